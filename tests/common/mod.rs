// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

#![allow(dead_code)]

use agora::actors::{Deployable, master, post, user};
use agora::address::Address;
use agora::econ::TokenAmount;
use agora::interpreter::{Ledger, LedgerConfig, SendResult};
use agora::message::Message;
use assert_cmd::{Command, cargo::cargo_bin_cmd};

pub const GENESIS: u64 = 1_700_000_000;

pub fn cli() -> Command {
    cargo_bin_cmd!("agora")
}

pub fn tokens(s: &str) -> TokenAmount {
    TokenAmount::parse(s).unwrap()
}

/// A ledger with a deployed master charging 0.05 per like and 0.15 per comment.
pub struct Harness {
    pub ledger: Ledger,
    pub admin: Address,
    pub master: master::ConstructorParams,
    next_query_id: u64,
}

impl Harness {
    pub fn new() -> Self {
        Self::setup(master::VotePolicy::AllowRepeat, TokenAmount::from_whole(100))
    }

    pub fn with_policy(vote_policy: master::VotePolicy) -> Self {
        Self::setup(vote_policy, TokenAmount::from_whole(100))
    }

    /// A master with an empty treasury.
    pub fn unfunded() -> Self {
        Self::setup(master::VotePolicy::AllowRepeat, TokenAmount::zero())
    }

    /// A ledger where nothing has been sent to the master yet.
    pub fn undeployed() -> Self {
        Self::bare(master::VotePolicy::AllowRepeat)
    }

    fn bare(vote_policy: master::VotePolicy) -> Self {
        let mut ledger = Ledger::new(LedgerConfig {
            genesis_time: Some(GENESIS),
            ..Default::default()
        });
        let admin = ledger.treasury("admin");
        let master = master::ConstructorParams {
            admin,
            price_for_like: tokens("0.05"),
            price_for_comment: tokens("0.15"),
            vote_policy,
        };
        Self {
            ledger,
            admin,
            master,
            next_query_id: 1,
        }
    }

    fn setup(vote_policy: master::VotePolicy, treasury: TokenAmount) -> Self {
        let mut h = Self::bare(vote_policy);
        let admin = h.admin;
        let query_id = h.query_id();
        let res = h
            .ledger
            .deploy(
                &admin,
                &h.master,
                master::Method::Deploy as u64,
                &master::DeployParams { query_id },
                TokenAmount::zero(),
            )
            .unwrap();
        assert!(res.all_successful(), "{res:?}");
        if !treasury.is_zero() {
            let master_addr = h.master_address();
            let res = h
                .ledger
                .send(Message::transfer(admin, master_addr, treasury))
                .unwrap();
            assert!(res.all_successful(), "{res:?}");
        }
        h
    }

    pub fn query_id(&mut self) -> u64 {
        let id = self.next_query_id;
        self.next_query_id += 1;
        id
    }

    pub fn master_address(&self) -> Address {
        self.master.address().unwrap()
    }

    pub fn master_state(&self) -> master::State {
        self.ledger.get_state(&self.master_address()).unwrap()
    }

    pub fn wallet(&mut self, name: &str) -> Address {
        self.ledger.treasury(name)
    }

    pub fn user_address(&self, owner: Address) -> Address {
        user::ConstructorParams {
            master: self.master_address(),
            owner,
        }
        .address()
        .unwrap()
    }

    pub fn user_state(&self, owner: Address) -> user::State {
        self.ledger.get_state(&self.user_address(owner)).unwrap()
    }

    pub fn post_address(&self, author: Address, post_index: u64) -> Address {
        post::ConstructorParams {
            master: self.master_address(),
            author,
            post_index,
        }
        .address()
        .unwrap()
    }

    pub fn post_state(&self, author: Address, post_index: u64) -> post::State {
        self.ledger
            .get_state(&self.post_address(author, post_index))
            .unwrap()
    }

    /// Deploys and initializes the User actor of `owner`.
    pub fn init_user(&mut self, owner: Address, name: &str) -> SendResult {
        let ctor = user::ConstructorParams {
            master: self.master_address(),
            owner,
        };
        self.ledger
            .deploy(
                &owner,
                &ctor,
                user::Method::InitUser as u64,
                &user::InitUserParams {
                    name: name.into(),
                    short_description: format!("{name} on agora"),
                    avatar_url: format!("https://avatars.example/{name}"),
                    age: 30,
                },
                TokenAmount::zero(),
            )
            .unwrap()
    }

    /// Sends `params` from `owner` to its User actor.
    pub fn user_call<P: serde::Serialize>(
        &mut self,
        owner: Address,
        method: user::Method,
        params: &P,
    ) -> SendResult {
        self.user_call_with_value(owner, method, params, TokenAmount::zero())
    }

    pub fn user_call_with_value<P: serde::Serialize>(
        &mut self,
        owner: Address,
        method: user::Method,
        params: &P,
        value: TokenAmount,
    ) -> SendResult {
        let to = self.user_address(owner);
        self.ledger
            .invoke(&owner, &to, method as u64, params, value)
            .unwrap()
    }

    pub fn create_post(&mut self, owner: Address, title: &str) -> SendResult {
        let query_id = self.query_id();
        self.user_call(
            owner,
            user::Method::CreatePost,
            &user::CreatePostParams {
                query_id,
                title: title.into(),
                text: format!("{title}, the long version"),
            },
        )
    }

    pub fn like(&mut self, owner: Address, author: Address, post_id: u64) -> SendResult {
        let query_id = self.query_id();
        self.user_call(
            owner,
            user::Method::LikePost,
            &user::LikePostParams {
                query_id,
                author,
                post_id,
            },
        )
    }

    pub fn comment(
        &mut self,
        owner: Address,
        author: Address,
        post_id: u64,
        text: &str,
    ) -> SendResult {
        let query_id = self.query_id();
        self.user_call(
            owner,
            user::Method::CommentPost,
            &user::CommentPostParams {
                query_id,
                author,
                post_id,
                text: text.into(),
            },
        )
    }

    pub fn claim(&mut self, author: Address, post_id: u64) -> SendResult {
        let query_id = self.query_id();
        let post = self.post_address(author, post_id);
        self.ledger
            .invoke(
                &author,
                &post,
                post::Method::InitClaimPayment as u64,
                &post::InitClaimPaymentParams { query_id },
                TokenAmount::zero(),
            )
            .unwrap()
    }

    pub fn start_voting(&mut self, from: Address, like: &str, comment: &str) -> SendResult {
        let query_id = self.query_id();
        let master = self.master_address();
        self.ledger
            .invoke(
                &from,
                &master,
                master::Method::StartVoting as u64,
                &master::StartVotingParams {
                    query_id,
                    new_price_for_like: tokens(like),
                    new_price_for_comment: tokens(comment),
                },
                TokenAmount::zero(),
            )
            .unwrap()
    }

    pub fn vote(&mut self, owner: Address, vote: bool) -> SendResult {
        let query_id = self.query_id();
        self.user_call(
            owner,
            user::Method::InitVote,
            &user::InitVoteParams { query_id, vote },
        )
    }

    pub fn end_voting(&mut self, from: Address) -> SendResult {
        let query_id = self.query_id();
        let master = self.master_address();
        self.ledger
            .invoke(
                &from,
                &master,
                master::Method::EndVoting as u64,
                &master::EndVotingParams { query_id },
                TokenAmount::zero(),
            )
            .unwrap()
    }
}
