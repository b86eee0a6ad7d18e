// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};

use super::ConstructorParams;
use crate::actors::Lifecycle;
use crate::address::Address;

/// Comment actor state. Immutable once initialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub master_address: Address,
    pub author_address: Address,
    pub commenter_address: Address,
    pub post_index: u64,
    pub comment_index: u64,
    pub initialized: bool,
    pub text: String,
}

impl State {
    pub fn new(params: &ConstructorParams) -> Self {
        Self {
            master_address: params.master,
            author_address: params.author,
            commenter_address: params.commenter,
            post_index: params.post_index,
            comment_index: params.comment_index,
            initialized: false,
            text: String::new(),
        }
    }
}

impl Lifecycle for State {
    fn initialized(&self) -> bool {
        self.initialized
    }
}
