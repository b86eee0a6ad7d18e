// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ConstructorParams, VotePolicy};
use crate::actor_error;
use crate::actors::Lifecycle;
use crate::address::Address;
use crate::clock::{SECONDS_IN_DAY, Timestamp};
use crate::econ::TokenAmount;
use crate::error::ActorError;

/// Master actor state: protocol prices and the voting that governs them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub admin_address: Address,
    pub initialized: bool,
    pub price_for_like: TokenAmount,
    pub price_for_comment: TokenAmount,
    pub vote_policy: VotePolicy,
    pub voting: VotingState,
    /// Users that voted in the current window. Only tracked under [`VotePolicy::OnePerUser`].
    pub voters: BTreeSet<Address>,
}

/// Outcome of a closed voting window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VotingOutcome {
    Accepted {
        price_for_like: TokenAmount,
        price_for_comment: TokenAmount,
    },
    Rejected,
}

/// Binary vote on a price change.
///
/// `Idle` while `active` is false, `VotingOpen` otherwise. A window opens no sooner
/// than a day after the previous one closed, accepts votes for a day, and may be
/// closed by anyone once that day has passed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingState {
    pub last_voting: Timestamp,
    pub active: bool,
    pub new_price_for_like: TokenAmount,
    pub new_price_for_comment: TokenAmount,
    pub yes_count: u64,
    pub no_count: u64,
    pub started: Timestamp,
}

impl VotingState {
    pub fn start(
        &mut self,
        now: Timestamp,
        new_price_for_like: TokenAmount,
        new_price_for_comment: TokenAmount,
    ) -> Result<(), ActorError> {
        if self.active {
            return Err(actor_error!(illegal_state; "voting is already active"));
        }
        if self.last_voting != 0 && now.saturating_sub(self.last_voting) < SECONDS_IN_DAY {
            return Err(actor_error!(illegal_state;
                "previous voting ended at {}, next one may start at {}",
                self.last_voting, self.last_voting.saturating_add(SECONDS_IN_DAY)));
        }
        *self = Self {
            last_voting: self.last_voting,
            active: true,
            new_price_for_like,
            new_price_for_comment,
            yes_count: 0,
            no_count: 0,
            started: now,
        };
        Ok(())
    }

    /// Fails unless votes are accepted at `now`.
    pub fn ensure_open(&self, now: Timestamp) -> Result<(), ActorError> {
        if !self.active {
            return Err(actor_error!(illegal_state; "voting is not active"));
        }
        if now.saturating_sub(self.started) >= SECONDS_IN_DAY {
            return Err(actor_error!(illegal_state;
                "voting window closed at {}", self.started.saturating_add(SECONDS_IN_DAY)));
        }
        Ok(())
    }

    pub fn tally(&mut self, vote: bool) {
        if vote {
            self.yes_count += 1;
        } else {
            self.no_count += 1;
        }
    }

    /// Closes the window and resets the tallies; the proposal passes on a strict majority.
    pub fn finish(&mut self, now: Timestamp) -> Result<VotingOutcome, ActorError> {
        if !self.active {
            return Err(actor_error!(illegal_state; "voting is not active"));
        }
        if now.saturating_sub(self.started) < SECONDS_IN_DAY {
            return Err(actor_error!(illegal_state;
                "voting cannot end before {}", self.started.saturating_add(SECONDS_IN_DAY)));
        }
        let finished = std::mem::replace(
            self,
            Self {
                last_voting: now,
                ..Default::default()
            },
        );
        Ok(if finished.yes_count > finished.no_count {
            VotingOutcome::Accepted {
                price_for_like: finished.new_price_for_like,
                price_for_comment: finished.new_price_for_comment,
            }
        } else {
            VotingOutcome::Rejected
        })
    }
}

impl State {
    pub fn new(params: &ConstructorParams) -> Self {
        Self {
            admin_address: params.admin,
            initialized: false,
            price_for_like: params.price_for_like.clone(),
            price_for_comment: params.price_for_comment.clone(),
            vote_policy: params.vote_policy,
            voting: VotingState::default(),
            voters: BTreeSet::new(),
        }
    }

    pub fn start_voting(
        &mut self,
        now: Timestamp,
        new_price_for_like: TokenAmount,
        new_price_for_comment: TokenAmount,
    ) -> Result<(), ActorError> {
        self.voting
            .start(now, new_price_for_like, new_price_for_comment)?;
        self.voters.clear();
        Ok(())
    }

    pub fn record_vote(&mut self, now: Timestamp, user: Address, vote: bool) -> Result<(), ActorError> {
        self.voting.ensure_open(now)?;
        if self.vote_policy == VotePolicy::OnePerUser && !self.voters.insert(user) {
            return Err(actor_error!(forbidden; "user {} already voted in this window", user));
        }
        self.voting.tally(vote);
        Ok(())
    }

    /// Ends the current window, applying the proposed prices if they won.
    pub fn end_voting(&mut self, now: Timestamp) -> Result<VotingOutcome, ActorError> {
        let outcome = self.voting.finish(now)?;
        if let VotingOutcome::Accepted {
            price_for_like,
            price_for_comment,
        } = &outcome
        {
            self.price_for_like = price_for_like.clone();
            self.price_for_comment = price_for_comment.clone();
        }
        self.voters.clear();
        Ok(outcome)
    }

    pub fn payout(&self, comments_count: u64, likes_count: u64) -> TokenAmount {
        &(&self.price_for_comment * comments_count) + &(&self.price_for_like * likes_count)
    }
}

impl Lifecycle for State {
    fn initialized(&self) -> bool {
        self.initialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExitCode;

    const T0: Timestamp = 1_700_000_000;

    fn master(policy: VotePolicy) -> State {
        let mut st = State::new(&ConstructorParams {
            admin: Address::new_wallet("admin"),
            price_for_like: TokenAmount::parse("0.05").unwrap(),
            price_for_comment: TokenAmount::parse("0.15").unwrap(),
            vote_policy: policy,
        });
        st.initialized = true;
        st
    }

    fn price(s: &str) -> TokenAmount {
        TokenAmount::parse(s).unwrap()
    }

    #[test]
    fn payout_weights_counts_by_price() {
        let st = master(VotePolicy::AllowRepeat);
        assert_eq!(st.payout(1, 1), price("0.2"));
        assert_eq!(st.payout(2, 1), price("0.35"));
        assert_eq!(st.payout(0, 0), TokenAmount::zero());
    }

    #[test]
    fn window_lifecycle() {
        let mut st = master(VotePolicy::AllowRepeat);
        st.start_voting(T0, price("1"), price("2")).unwrap();
        assert!(st.voting.active);
        assert_eq!(st.voting.started, T0);

        let err = st.start_voting(T0 + 1, price("1"), price("2")).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::USR_ILLEGAL_STATE);

        st.record_vote(T0 + 10, Address::new_wallet("u1"), true).unwrap();
        st.record_vote(T0 + 10, Address::new_wallet("u1"), true).unwrap();
        st.record_vote(T0 + 20, Address::new_wallet("u2"), false).unwrap();
        assert_eq!((st.voting.yes_count, st.voting.no_count), (2, 1));
        assert!(st.voters.is_empty());

        let err = st.end_voting(T0 + SECONDS_IN_DAY - 1).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::USR_ILLEGAL_STATE);

        let err = st
            .record_vote(T0 + SECONDS_IN_DAY, Address::new_wallet("u3"), false)
            .unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::USR_ILLEGAL_STATE);

        let outcome = st.end_voting(T0 + SECONDS_IN_DAY).unwrap();
        assert!(matches!(outcome, VotingOutcome::Accepted { .. }));
        assert_eq!(st.price_for_like, price("1"));
        assert_eq!(st.price_for_comment, price("2"));
        assert_eq!(
            st.voting,
            VotingState {
                last_voting: T0 + SECONDS_IN_DAY,
                ..Default::default()
            }
        );
    }

    #[test]
    fn tie_keeps_prices() {
        let mut st = master(VotePolicy::AllowRepeat);
        st.start_voting(T0, price("1"), price("2")).unwrap();
        st.record_vote(T0, Address::new_wallet("u1"), true).unwrap();
        st.record_vote(T0, Address::new_wallet("u2"), false).unwrap();
        let outcome = st.end_voting(T0 + SECONDS_IN_DAY).unwrap();
        assert_eq!(outcome, VotingOutcome::Rejected);
        assert_eq!(st.price_for_like, price("0.05"));
    }

    #[test]
    fn cooldown_after_window() {
        let mut st = master(VotePolicy::AllowRepeat);
        st.start_voting(T0, price("1"), price("2")).unwrap();
        let end = T0 + SECONDS_IN_DAY;
        st.end_voting(end).unwrap();
        assert!(st.start_voting(end + SECONDS_IN_DAY - 1, price("1"), price("2")).is_err());
        st.start_voting(end + SECONDS_IN_DAY, price("1"), price("2")).unwrap();
    }

    #[test]
    fn windows_near_the_end_of_time() {
        let mut st = master(VotePolicy::AllowRepeat);
        let late = Timestamp::MAX - 10;
        st.start_voting(late, price("1"), price("2")).unwrap();
        let err = st.end_voting(Timestamp::MAX).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::USR_ILLEGAL_STATE);
        st.record_vote(Timestamp::MAX, Address::new_wallet("u1"), true)
            .unwrap();

        st.voting = VotingState {
            last_voting: late,
            ..Default::default()
        };
        let err = st
            .start_voting(Timestamp::MAX, price("1"), price("2"))
            .unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::USR_ILLEGAL_STATE);
    }

    #[test]
    fn one_per_user_rejects_repeat() {
        let mut st = master(VotePolicy::OnePerUser);
        st.start_voting(T0, price("1"), price("2")).unwrap();
        let u1 = Address::new_wallet("u1");
        st.record_vote(T0, u1, true).unwrap();
        let err = st.record_vote(T0 + 1, u1, false).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::USR_FORBIDDEN);
        assert_eq!((st.voting.yes_count, st.voting.no_count), (1, 0));

        st.end_voting(T0 + SECONDS_IN_DAY).unwrap();
        assert!(st.voters.is_empty());
    }
}
