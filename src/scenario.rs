// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Scripted interactions with a fresh ledger.
//!
//! A scenario is a TOML file with a list of `[[step]]` tables, each tagged by its
//! `action`. Wallets are referred to by name and created on first use; the scenario
//! works against the single master deployed by its `deploy-master` step.
//!
//! ```toml
//! [[step]]
//! action = "deploy-master"
//! admin = "admin"
//! price_for_like = "0.05"
//! price_for_comment = "0.15"
//!
//! [[step]]
//! action = "init-user"
//! owner = "alice"
//! name = "Alice"
//! ```

use std::collections::BTreeMap;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::actors::{Deployable, master, post, user};
use crate::address::Address;
use crate::econ::TokenAmount;
use crate::interpreter::{Ledger, SendResult, Transaction};
use crate::message::Message;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid scenario")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    /// Creates a funded wallet.
    Wallet { name: String },
    DeployMaster {
        admin: String,
        price_for_like: TokenAmount,
        price_for_comment: TokenAmount,
        #[serde(default)]
        vote_policy: master::VotePolicy,
        #[serde(default)]
        value: TokenAmount,
    },
    /// Plain transfer into the master treasury.
    TopUp { from: String, value: TokenAmount },
    InitUser {
        owner: String,
        name: String,
        #[serde(default)]
        short_description: String,
        #[serde(default)]
        avatar_url: String,
        #[serde(default)]
        age: u32,
        #[serde(default)]
        value: TokenAmount,
    },
    ChangeAvatarUrl { owner: String, avatar_url: String },
    ChangeShortDescription {
        owner: String,
        short_description: String,
    },
    CreatePost {
        owner: String,
        title: String,
        text: String,
        #[serde(default)]
        value: TokenAmount,
    },
    LikePost {
        owner: String,
        author: String,
        post_id: u64,
        #[serde(default)]
        value: TokenAmount,
    },
    CommentPost {
        owner: String,
        author: String,
        post_id: u64,
        text: String,
        #[serde(default)]
        value: TokenAmount,
    },
    ClaimPayment {
        author: String,
        post_id: u64,
        #[serde(default)]
        value: TokenAmount,
    },
    StartVoting {
        admin: String,
        new_price_for_like: TokenAmount,
        new_price_for_comment: TokenAmount,
    },
    Vote {
        owner: String,
        vote: bool,
        #[serde(default)]
        value: TokenAmount,
    },
    EndVoting { sender: String },
    /// Moves the ledger clock forward.
    Advance { seconds: u64 },
}

impl Step {
    pub fn action(&self) -> &'static str {
        match self {
            Step::Wallet { .. } => "wallet",
            Step::DeployMaster { .. } => "deploy-master",
            Step::TopUp { .. } => "top-up",
            Step::InitUser { .. } => "init-user",
            Step::ChangeAvatarUrl { .. } => "change-avatar-url",
            Step::ChangeShortDescription { .. } => "change-short-description",
            Step::CreatePost { .. } => "create-post",
            Step::LikePost { .. } => "like-post",
            Step::CommentPost { .. } => "comment-post",
            Step::ClaimPayment { .. } => "claim-payment",
            Step::StartVoting { .. } => "start-voting",
            Step::Vote { .. } => "vote",
            Step::EndVoting { .. } => "end-voting",
            Step::Advance { .. } => "advance",
        }
    }
}

/// Outcome of one step, printed as a JSON line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub action: &'static str,
    pub now: u64,
    pub transactions: Vec<Transaction>,
}

/// Final state of an actor touched by the scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub kind: &'static str,
    pub address: Address,
    pub balance: TokenAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub state: serde_json::Value,
}

pub struct ScenarioRunner {
    ledger: Ledger,
    master: Option<master::ConstructorParams>,
    wallets: BTreeMap<String, Address>,
    users: BTreeMap<String, Address>,
    posts: Vec<(String, u64, Address)>,
    next_query_id: u64,
}

impl ScenarioRunner {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger,
            master: None,
            wallets: BTreeMap::new(),
            users: BTreeMap::new(),
            posts: Vec::new(),
            next_query_id: 1,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    /// Address of the master deployed by this scenario.
    pub fn master_address(&self) -> anyhow::Result<Address> {
        Ok(self.master_params()?.address()?)
    }

    fn master_params(&self) -> anyhow::Result<&master::ConstructorParams> {
        self.master
            .as_ref()
            .context("no master deployed yet, add a deploy-master step first")
    }

    fn wallet(&mut self, name: &str) -> Address {
        let addr = self.ledger.treasury(name);
        self.wallets.insert(name.to_owned(), addr);
        addr
    }

    fn query_id(&mut self) -> u64 {
        let id = self.next_query_id;
        self.next_query_id += 1;
        id
    }

    fn user_params(&mut self, owner: &str) -> anyhow::Result<user::ConstructorParams> {
        let master = self.master_address()?;
        let owner = self.wallet(owner);
        Ok(user::ConstructorParams { master, owner })
    }

    pub fn run(&mut self, scenario: &Scenario) -> anyhow::Result<Vec<StepReport>> {
        scenario
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| self.run_step(i + 1, step))
            .collect()
    }

    pub fn run_step(&mut self, index: usize, step: &Step) -> anyhow::Result<StepReport> {
        debug!(step = index, action = step.action(), "running scenario step");
        let result = self
            .apply(step)
            .with_context(|| format!("step {index} ({}) failed", step.action()))?;
        Ok(StepReport {
            step: index,
            action: step.action(),
            now: self.ledger.now(),
            transactions: result.transactions,
        })
    }

    fn apply(&mut self, step: &Step) -> anyhow::Result<SendResult> {
        let result = match step {
            Step::Wallet { name } => {
                self.wallet(name);
                SendResult::default()
            }
            Step::DeployMaster {
                admin,
                price_for_like,
                price_for_comment,
                vote_policy,
                value,
            } => {
                let admin = self.wallet(admin);
                let params = master::ConstructorParams {
                    admin,
                    price_for_like: price_for_like.clone(),
                    price_for_comment: price_for_comment.clone(),
                    vote_policy: *vote_policy,
                };
                let query_id = self.query_id();
                let result = self.ledger.deploy(
                    &admin,
                    &params,
                    master::Method::Deploy as u64,
                    &master::DeployParams { query_id },
                    value.clone(),
                )?;
                self.master = Some(params);
                result
            }
            Step::TopUp { from, value } => {
                let from = self.wallet(from);
                let master = self.master_address()?;
                self.ledger
                    .send(Message::transfer(from, master, value.clone()))?
            }
            Step::InitUser {
                owner,
                name,
                short_description,
                avatar_url,
                age,
                value,
            } => {
                let ctor = self.user_params(owner)?;
                self.users.insert(owner.clone(), ctor.address()?);
                self.ledger.deploy(
                    &ctor.owner,
                    &ctor,
                    user::Method::InitUser as u64,
                    &user::InitUserParams {
                        name: name.clone(),
                        short_description: short_description.clone(),
                        avatar_url: avatar_url.clone(),
                        age: *age,
                    },
                    value.clone(),
                )?
            }
            Step::ChangeAvatarUrl { owner, avatar_url } => {
                let ctor = self.user_params(owner)?;
                let query_id = self.query_id();
                self.ledger.invoke(
                    &ctor.owner,
                    &ctor.address()?,
                    user::Method::ChangeAvatarUrl as u64,
                    &user::ChangeAvatarUrlParams {
                        query_id,
                        avatar_url: avatar_url.clone(),
                    },
                    TokenAmount::zero(),
                )?
            }
            Step::ChangeShortDescription {
                owner,
                short_description,
            } => {
                let ctor = self.user_params(owner)?;
                let query_id = self.query_id();
                self.ledger.invoke(
                    &ctor.owner,
                    &ctor.address()?,
                    user::Method::ChangeShortDescription as u64,
                    &user::ChangeShortDescriptionParams {
                        query_id,
                        short_description: short_description.clone(),
                    },
                    TokenAmount::zero(),
                )?
            }
            Step::CreatePost {
                owner,
                title,
                text,
                value,
            } => {
                let ctor = self.user_params(owner)?;
                let user_addr = ctor.address()?;
                let post_index = self
                    .ledger
                    .get_state::<user::State>(&user_addr)
                    .map(|st| st.post_index)
                    .unwrap_or_default();
                let query_id = self.query_id();
                let result = self.ledger.invoke(
                    &ctor.owner,
                    &user_addr,
                    user::Method::CreatePost as u64,
                    &user::CreatePostParams {
                        query_id,
                        title: title.clone(),
                        text: text.clone(),
                    },
                    value.clone(),
                )?;
                let post_addr = post::ConstructorParams {
                    master: ctor.master,
                    author: ctor.owner,
                    post_index,
                }
                .address()?;
                if self.ledger.code_of(&post_addr).is_some()
                    && !self.posts.iter().any(|(_, _, a)| *a == post_addr)
                {
                    self.posts.push((owner.clone(), post_index, post_addr));
                }
                result
            }
            Step::LikePost {
                owner,
                author,
                post_id,
                value,
            } => {
                let ctor = self.user_params(owner)?;
                let author = self.wallet(author);
                let query_id = self.query_id();
                self.ledger.invoke(
                    &ctor.owner,
                    &ctor.address()?,
                    user::Method::LikePost as u64,
                    &user::LikePostParams {
                        query_id,
                        author,
                        post_id: *post_id,
                    },
                    value.clone(),
                )?
            }
            Step::CommentPost {
                owner,
                author,
                post_id,
                text,
                value,
            } => {
                let ctor = self.user_params(owner)?;
                let author = self.wallet(author);
                let query_id = self.query_id();
                self.ledger.invoke(
                    &ctor.owner,
                    &ctor.address()?,
                    user::Method::CommentPost as u64,
                    &user::CommentPostParams {
                        query_id,
                        author,
                        post_id: *post_id,
                        text: text.clone(),
                    },
                    value.clone(),
                )?
            }
            Step::ClaimPayment {
                author,
                post_id,
                value,
            } => {
                let master = self.master_address()?;
                let author = self.wallet(author);
                let post_addr = post::ConstructorParams {
                    master,
                    author,
                    post_index: *post_id,
                }
                .address()?;
                let query_id = self.query_id();
                self.ledger.invoke(
                    &author,
                    &post_addr,
                    post::Method::InitClaimPayment as u64,
                    &post::InitClaimPaymentParams { query_id },
                    value.clone(),
                )?
            }
            Step::StartVoting {
                admin,
                new_price_for_like,
                new_price_for_comment,
            } => {
                let master = self.master_address()?;
                let admin = self.wallet(admin);
                let query_id = self.query_id();
                self.ledger.invoke(
                    &admin,
                    &master,
                    master::Method::StartVoting as u64,
                    &master::StartVotingParams {
                        query_id,
                        new_price_for_like: new_price_for_like.clone(),
                        new_price_for_comment: new_price_for_comment.clone(),
                    },
                    TokenAmount::zero(),
                )?
            }
            Step::Vote { owner, vote, value } => {
                let ctor = self.user_params(owner)?;
                let query_id = self.query_id();
                self.ledger.invoke(
                    &ctor.owner,
                    &ctor.address()?,
                    user::Method::InitVote as u64,
                    &user::InitVoteParams {
                        query_id,
                        vote: *vote,
                    },
                    value.clone(),
                )?
            }
            Step::EndVoting { sender } => {
                let master = self.master_address()?;
                let sender = self.wallet(sender);
                let query_id = self.query_id();
                self.ledger.invoke(
                    &sender,
                    &master,
                    master::Method::EndVoting as u64,
                    &master::EndVotingParams { query_id },
                    TokenAmount::zero(),
                )?
            }
            Step::Advance { seconds } => {
                self.ledger.advance(*seconds);
                SendResult::default()
            }
        };
        Ok(result)
    }

    /// Final records of every wallet and actor the scenario touched.
    pub fn records(&self) -> anyhow::Result<Vec<Record>> {
        let mut records = Vec::new();
        for (name, addr) in &self.wallets {
            records.push(Record {
                kind: "account",
                address: *addr,
                balance: self.ledger.balance(addr),
                label: Some(name.clone()),
                state: serde_json::Value::Null,
            });
        }
        if let Some(params) = &self.master {
            let addr = params.address()?;
            records.push(self.record::<master::State>("master", addr, None)?);
        }
        for (owner, addr) in &self.users {
            if self.ledger.code_of(addr).is_some() {
                records.push(self.record::<user::State>("user", *addr, Some(owner.clone()))?);
            }
        }
        for (author, index, addr) in &self.posts {
            records.push(self.record::<post::State>(
                "post",
                *addr,
                Some(format!("{author}/{index}")),
            )?);
        }
        Ok(records)
    }

    fn record<S>(
        &self,
        kind: &'static str,
        address: Address,
        label: Option<String>,
    ) -> anyhow::Result<Record>
    where
        S: serde::de::DeserializeOwned + Serialize,
    {
        let state: S = self.ledger.get_state(&address)?;
        Ok(Record {
            kind,
            address,
            balance: self.ledger.balance(&address),
            label,
            state: serde_json::to_value(state)?,
        })
    }
}
