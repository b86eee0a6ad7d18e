// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod account;
pub mod comment;
pub mod master;
pub mod post;
pub mod user;

use std::sync::LazyLock;

use cid::Cid;
use fvm_ipld_encoding::IPLD_RAW;
use serde::Serialize;

use crate::actor_error;
use crate::address::{Address, StateInit};
use crate::error::ActorError;
use crate::utils::multihash::prelude::*;

/// Code identifier prefix shared by every actor kind.
const CODE_PREFIX: &str = "agora/1/";

/// Every kind of actor the ledger knows how to run.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ActorKind {
    Account,
    Master,
    User,
    Post,
    Comment,
}

static CODE_CIDS: LazyLock<Vec<(ActorKind, Cid)>> = LazyLock::new(|| {
    use strum::IntoEnumIterator as _;
    ActorKind::iter().map(|kind| (kind, kind.code_cid())).collect()
});

impl ActorKind {
    /// The code CID of this actor kind: raw codec, identity hash of `agora/1/<kind>`.
    pub fn code_cid(self) -> Cid {
        let name: &'static str = self.into();
        let hash = MultihashCode::Identity.digest(format!("{CODE_PREFIX}{name}").as_bytes());
        Cid::new_v1(IPLD_RAW, hash)
    }

    pub fn from_code(code: &Cid) -> Option<Self> {
        CODE_CIDS
            .iter()
            .find_map(|(kind, cid)| (cid == code).then_some(*kind))
    }
}

/// Constructor parameters of an actor, which fully determine its address.
pub trait Deployable: Serialize + Sized {
    const KIND: ActorKind;

    fn state_init(&self) -> Result<StateInit, ActorError> {
        StateInit::new(Self::KIND.code_cid(), self)
            .map_err(|e| actor_error!(serialization; "failed to encode {} constructor: {}", Self::KIND, e))
    }

    fn address(&self) -> Result<Address, ActorError> {
        Ok(self.state_init()?.address())
    }
}

/// One-time initialization guard shared by the protocol actors.
pub trait Lifecycle {
    fn initialized(&self) -> bool;

    fn require_initialized(&self) -> Result<(), ActorError> {
        if self.initialized() {
            Ok(())
        } else {
            Err(actor_error!(illegal_state; "actor is not initialized"))
        }
    }

    fn require_uninitialized(&self) -> Result<(), ActorError> {
        if self.initialized() {
            Err(actor_error!(illegal_state; "actor is already initialized"))
        } else {
            Ok(())
        }
    }
}
