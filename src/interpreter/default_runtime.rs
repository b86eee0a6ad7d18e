// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use fvm_ipld_encoding::RawBytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::actor_error;
use crate::address::{Address, StateInit};
use crate::clock::Timestamp;
use crate::econ::TokenAmount;
use crate::error::ActorError;
use crate::message::{Message, MethodNum};
use crate::runtime::{MessageInfo, Runtime};

pub(super) struct VMMsg {
    pub caller: Address,
    pub receiver: Address,
    pub value_received: TokenAmount,
}

impl MessageInfo for VMMsg {
    fn caller(&self) -> &Address {
        &self.caller
    }
    fn receiver(&self) -> &Address {
        &self.receiver
    }
    fn value_received(&self) -> &TokenAmount {
        &self.value_received
    }
}

/// Implementation of the Runtime trait for a single message delivery.
///
/// Works on a private copy of the receiver's state; the ledger commits it, along with
/// the queued outbound messages, only if the handler succeeds.
pub(super) struct DefaultRuntime {
    vm_msg: VMMsg,
    now: Timestamp,
    state: RawBytes,
    outbound: Vec<Message>,
    caller_validated: bool,
    allow_internal: bool,
}

impl DefaultRuntime {
    pub fn new(vm_msg: VMMsg, now: Timestamp, state: RawBytes) -> Self {
        Self {
            vm_msg,
            now,
            state,
            outbound: Vec::new(),
            caller_validated: false,
            allow_internal: true,
        }
    }

    pub fn caller_validated(&self) -> bool {
        self.caller_validated
    }

    /// Consumes the runtime, returning the new receiver state and the messages to deliver.
    pub fn into_effects(self) -> (RawBytes, Vec<Message>) {
        (self.state, self.outbound)
    }

    fn abort_if_already_validated(&mut self) -> Result<(), ActorError> {
        if self.caller_validated {
            Err(actor_error!(illegal_actor;
                    "Method must validate caller identity exactly once"))
        } else {
            self.caller_validated = true;
            Ok(())
        }
    }

    fn queue(&mut self, msg: Message) -> Result<(), ActorError> {
        if !self.allow_internal {
            return Err(actor_error!(illegal_actor; "calling send is not allowed during transaction"));
        }
        if msg.value.is_negative() {
            return Err(actor_error!(illegal_argument;
                "attempted to send negative value {}", msg.value));
        }
        self.outbound.push(msg);
        Ok(())
    }
}

impl Runtime for DefaultRuntime {
    fn message(&self) -> &dyn MessageInfo {
        &self.vm_msg
    }

    fn tx_time(&self) -> Timestamp {
        self.now
    }

    fn validate_immediate_caller_accept_any(&mut self) -> Result<(), ActorError> {
        self.abort_if_already_validated()
    }

    fn validate_immediate_caller_is<'a, I>(&mut self, addresses: I) -> Result<(), ActorError>
    where
        I: IntoIterator<Item = &'a Address>,
    {
        self.abort_if_already_validated()?;

        let imm = self.message().caller();

        // Check if theres is at least one match
        if !addresses.into_iter().any(|a| a == imm) {
            return Err(actor_error!(forbidden;
                "caller {} is not one of supported", self.message().caller()
            ));
        }
        Ok(())
    }

    fn state<S: DeserializeOwned>(&self) -> Result<S, ActorError> {
        self.state
            .deserialize()
            .map_err(|e| actor_error!(illegal_actor; "failed to load actor state: {}", e))
    }

    fn transaction<S, RT, F>(&mut self, f: F) -> Result<RT, ActorError>
    where
        S: Serialize + DeserializeOwned,
        F: FnOnce(&mut S, &mut Self) -> Result<RT, ActorError>,
    {
        let mut state: S = self.state()?;

        self.allow_internal = false;
        let result = f(&mut state, self);
        self.allow_internal = true;

        let ret = result?;
        self.state = RawBytes::serialize(&state)
            .map_err(|e| actor_error!(illegal_actor; "failed to store actor state: {}", e))?;
        Ok(ret)
    }

    fn send(
        &mut self,
        to: &Address,
        method: MethodNum,
        params: RawBytes,
        value: TokenAmount,
    ) -> Result<(), ActorError> {
        let msg = Message::new(self.vm_msg.receiver, *to, method, params).with_value(value);
        self.queue(msg)
    }

    fn send_with_init(
        &mut self,
        init: StateInit,
        method: MethodNum,
        params: RawBytes,
        value: TokenAmount,
    ) -> Result<(), ActorError> {
        let msg = Message::deploying(self.vm_msg.receiver, init, method, params).with_value(value);
        self.queue(msg)
    }
}
