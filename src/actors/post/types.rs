// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use fvm_ipld_encoding::tuple::*;

use crate::actors::{ActorKind, Deployable};
use crate::address::Address;

/// Constructor parameters of a Post actor: post number `post_index` of `author`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct ConstructorParams {
    pub master: Address,
    pub author: Address,
    pub post_index: u64,
}

impl Deployable for ConstructorParams {
    const KIND: ActorKind = ActorKind::Post;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct InitPostParams {
    pub query_id: u64,
    pub title: String,
    pub text: String,
}

/// Relayed by the User actor of `user` when its owner likes the post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct PostLikedParams {
    pub query_id: u64,
    pub user: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct PostCommentedParams {
    pub query_id: u64,
    pub user: Address,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct InitClaimPaymentParams {
    pub query_id: u64,
}

/// Likes and comments accrued since the last claim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unpaid {
    pub likes: u64,
    pub comments: u64,
}
