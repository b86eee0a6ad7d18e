// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};

use super::{ConstructorParams, Unpaid};
use crate::actor_error;
use crate::actors::Lifecycle;
use crate::address::Address;
use crate::error::ActorError;

/// Post actor state.
///
/// Counters only move forward, and the paid ones never overtake their totals:
/// `likes_paid <= likes_count` and `comments_paid <= comments_index`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub master_address: Address,
    pub author_address: Address,
    pub post_index: u64,
    pub initialized: bool,
    pub title: String,
    pub text: String,
    /// Number of comments so far, and the index the next comment will get.
    pub comments_index: u64,
    pub likes_count: u64,
    pub comments_paid: u64,
    pub likes_paid: u64,
}

impl State {
    pub fn new(params: &ConstructorParams) -> Self {
        Self {
            master_address: params.master,
            author_address: params.author,
            post_index: params.post_index,
            initialized: false,
            title: String::new(),
            text: String::new(),
            comments_index: 0,
            likes_count: 0,
            comments_paid: 0,
            likes_paid: 0,
        }
    }

    pub fn next_comment_index(&mut self) -> u64 {
        let index = self.comments_index;
        self.comments_index += 1;
        index
    }

    pub fn unpaid(&self) -> Unpaid {
        Unpaid {
            likes: self.likes_count - self.likes_paid,
            comments: self.comments_index - self.comments_paid,
        }
    }

    /// Marks everything accrued so far as paid and returns it.
    ///
    /// This is the irreversible half of a claim: the payout itself is a separate
    /// message to the master which is not awaited.
    pub fn take_unpaid(&mut self) -> Result<Unpaid, ActorError> {
        let unpaid = self.unpaid();
        if unpaid == Unpaid::default() {
            return Err(actor_error!(illegal_state; "nothing to claim"));
        }
        self.likes_paid = self.likes_count;
        self.comments_paid = self.comments_index;
        Ok(unpaid)
    }
}

impl Lifecycle for State {
    fn initialized(&self) -> bool {
        self.initialized
    }
}
