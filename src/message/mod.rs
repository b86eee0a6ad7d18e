// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use fvm_ipld_encoding::RawBytes;
use serde::Serialize;

use crate::address::{Address, StateInit};
use crate::econ::TokenAmount;

/// Method number for an actor's method.
pub type MethodNum = u64;

/// Plain value transfer. Accounts accept it from anyone, so does the master treasury.
pub const METHOD_SEND: MethodNum = 0;
/// The method that moves an actor from deployed to initialized.
pub const METHOD_CONSTRUCTOR: MethodNum = 1;

/// A one-way, value-bearing message between two addresses.
///
/// When `state_init` is present and the recipient does not exist yet, delivering the
/// message deploys the recipient first. A failed handler refunds `value` to the sender
/// if the message is `bounce`able.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub from: Address,
    pub to: Address,
    pub value: TokenAmount,
    pub method_num: MethodNum,
    pub params: RawBytes,
    pub state_init: Option<StateInit>,
    pub bounce: bool,
}

impl Message {
    /// Bounceable message with no value attached.
    pub fn new(from: Address, to: Address, method_num: MethodNum, params: RawBytes) -> Self {
        Self {
            from,
            to,
            value: TokenAmount::zero(),
            method_num,
            params,
            state_init: None,
            bounce: true,
        }
    }

    /// Same as [`Message::new`] with parameters encoded from a typed struct.
    pub fn new_typed<P: Serialize>(
        from: Address,
        to: Address,
        method_num: MethodNum,
        params: &P,
    ) -> Result<Self, fvm_ipld_encoding::Error> {
        Ok(Self::new(from, to, method_num, RawBytes::serialize(params)?))
    }

    /// Message deploying the actor described by `init`, addressed to it.
    pub fn deploying(
        from: Address,
        init: StateInit,
        method_num: MethodNum,
        params: RawBytes,
    ) -> Self {
        let mut msg = Self::new(from, init.address(), method_num, params);
        msg.state_init = Some(init);
        msg
    }

    /// Plain transfer of `value`.
    pub fn transfer(from: Address, to: Address, value: TokenAmount) -> Self {
        Self::new(from, to, METHOD_SEND, RawBytes::default()).with_value(value)
    }

    pub fn with_value(mut self, value: TokenAmount) -> Self {
        self.value = value;
        self
    }

    pub fn with_state_init(mut self, init: StateInit) -> Self {
        self.state_init = Some(init);
        self
    }

    pub fn with_bounce(mut self, bounce: bool) -> Self {
        self.bounce = bounce;
        self
    }
}
