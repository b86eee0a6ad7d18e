// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};

use super::ConstructorParams;
use crate::actors::Lifecycle;
use crate::address::Address;

/// User actor state: a profile and a counter of created posts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub master_address: Address,
    /// The owner wallet, the only address allowed to act on behalf of this user.
    pub user_address: Address,
    pub initialized: bool,
    pub name: String,
    pub short_description: String,
    pub avatar_url: String,
    pub age: u32,
    /// Index the next created post will get.
    pub post_index: u64,
}

impl State {
    pub fn new(params: &ConstructorParams) -> Self {
        Self {
            master_address: params.master,
            user_address: params.owner,
            initialized: false,
            name: String::new(),
            short_description: String::new(),
            avatar_url: String::new(),
            age: 0,
            post_index: 0,
        }
    }

    /// Returns the index for a new post and advances the counter.
    pub fn next_post_index(&mut self) -> u64 {
        let index = self.post_index;
        self.post_index += 1;
        index
    }
}

impl Lifecycle for State {
    fn initialized(&self) -> bool {
        self.initialized
    }
}
