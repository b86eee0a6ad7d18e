// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use fvm_ipld_encoding::tuple::*;

use crate::actors::{ActorKind, Deployable};
use crate::address::Address;

/// Constructor parameters of a User actor: one per `(master, owner)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct ConstructorParams {
    pub master: Address,
    pub owner: Address,
}

impl Deployable for ConstructorParams {
    const KIND: ActorKind = ActorKind::User;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct InitUserParams {
    pub name: String,
    pub short_description: String,
    pub avatar_url: String,
    pub age: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct ChangeAvatarUrlParams {
    pub query_id: u64,
    pub avatar_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct ChangeShortDescriptionParams {
    pub query_id: u64,
    pub short_description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct CreatePostParams {
    pub query_id: u64,
    pub title: String,
    pub text: String,
}

/// Like the post number `post_id` written by `author`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct LikePostParams {
    pub query_id: u64,
    pub author: Address,
    pub post_id: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct CommentPostParams {
    pub query_id: u64,
    pub author: Address,
    pub post_id: u64,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct InitVoteParams {
    pub query_id: u64,
    pub vote: bool,
}
