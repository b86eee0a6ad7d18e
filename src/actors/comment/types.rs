// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use fvm_ipld_encoding::tuple::*;

use crate::actors::{ActorKind, Deployable};
use crate::address::Address;

/// Constructor parameters of a Comment actor: comment `comment_index` by `commenter`
/// on post `post_index` of `author`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct ConstructorParams {
    pub master: Address,
    pub author: Address,
    pub commenter: Address,
    pub post_index: u64,
    pub comment_index: u64,
}

impl Deployable for ConstructorParams {
    const KIND: ActorKind = ActorKind::Comment;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct InitCommentParams {
    pub query_id: u64,
    pub text: String,
}
