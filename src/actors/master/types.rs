// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use fvm_ipld_encoding::tuple::*;
use serde::{Deserialize, Serialize};

use crate::actors::{ActorKind, Deployable};
use crate::address::Address;
use crate::econ::TokenAmount;

/// How repeated votes from one user within a single voting window are treated.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum VotePolicy {
    /// Every relayed vote is counted.
    #[default]
    AllowRepeat,
    /// A user votes at most once per window; later votes are rejected.
    OnePerUser,
}

/// Constructor parameters of the Master actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct ConstructorParams {
    pub admin: Address,
    pub price_for_like: TokenAmount,
    pub price_for_comment: TokenAmount,
    pub vote_policy: VotePolicy,
}

impl Deployable for ConstructorParams {
    const KIND: ActorKind = ActorKind::Master;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct DeployParams {
    pub query_id: u64,
}

/// Payout request relayed by post `post_index` of `author`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct ClaimPaymentParams {
    pub query_id: u64,
    pub author: Address,
    pub comments_count: u64,
    pub likes_count: u64,
    pub post_index: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct StartVotingParams {
    pub query_id: u64,
    pub new_price_for_like: TokenAmount,
    pub new_price_for_comment: TokenAmount,
}

/// Vote relayed by the User actor of `user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct VoteParams {
    pub query_id: u64,
    pub user: Address,
    pub vote: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct EndVotingParams {
    pub query_id: u64,
}
