// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use ahash::HashMap;
use cid::Cid;
use fvm_ipld_encoding::RawBytes;

use crate::actors::ActorKind;
use crate::address::Address;
use crate::econ::TokenAmount;

/// State of every actor on the ledger
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorState {
    /// Identifier for the code that this actor runs.
    pub code: Cid,
    /// Encoded actor state.
    pub state: RawBytes,
    /// Token balance of the actor.
    pub balance: TokenAmount,
}

impl ActorState {
    pub fn new(code: Cid, state: RawBytes, balance: TokenAmount) -> Self {
        Self {
            code,
            state,
            balance,
        }
    }

    /// A wallet holding `balance`.
    pub fn new_account(balance: TokenAmount) -> Self {
        Self::new(ActorKind::Account.code_cid(), RawBytes::default(), balance)
    }

    pub fn kind(&self) -> Option<ActorKind> {
        ActorKind::from_code(&self.code)
    }

    /// Safely deducts funds from an actor, returning `false` when the balance does not cover them.
    pub fn deduct_funds(&mut self, amt: &TokenAmount) -> bool {
        if &self.balance < amt {
            return false;
        }
        self.balance -= amt;
        true
    }

    /// Deposits funds to an actor.
    pub fn deposit_funds(&mut self, amt: &TokenAmount) {
        self.balance += amt;
    }
}

/// Address-keyed store of all actors.
#[derive(Clone, Debug, Default)]
pub struct StateTree {
    actors: HashMap<Address, ActorState>,
}

impl StateTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_actor(&self, addr: &Address) -> Option<&ActorState> {
        self.actors.get(addr)
    }

    pub fn get_actor_mut(&mut self, addr: &Address) -> Option<&mut ActorState> {
        self.actors.get_mut(addr)
    }

    pub fn set_actor(&mut self, addr: Address, actor: ActorState) {
        self.actors.insert(addr, actor);
    }

    pub fn contains(&self, addr: &Address) -> bool {
        self.actors.contains_key(addr)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Sum of all balances. Transfers never change it.
    pub fn total_balance(&self) -> TokenAmount {
        self.actors.values().map(|a| &a.balance).sum()
    }
}
