// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! The seam between actor code and the ledger hosting it.

use fvm_ipld_encoding::RawBytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::actor_error;
use crate::address::{Address, StateInit};
use crate::clock::Timestamp;
use crate::econ::TokenAmount;
use crate::error::ActorError;
use crate::message::MethodNum;

/// Information about the message currently being processed.
pub trait MessageInfo {
    /// The address of the immediate calling actor.
    fn caller(&self) -> &Address;
    /// The address of the actor receiving the message.
    fn receiver(&self) -> &Address;
    /// The value attached to the message being processed.
    fn value_received(&self) -> &TokenAmount;
}

/// Runtime is the VM's internal runtime object exposed to actors.
pub trait Runtime {
    /// Information related to the current message being executed.
    fn message(&self) -> &dyn MessageInfo;

    /// Ledger time at which the message is processed.
    fn tx_time(&self) -> Timestamp;

    /// Validates the caller against some predicate.
    /// Exported actor methods must invoke exactly one caller validation before returning.
    fn validate_immediate_caller_accept_any(&mut self) -> Result<(), ActorError>;
    fn validate_immediate_caller_is<'a, I>(&mut self, addresses: I) -> Result<(), ActorError>
    where
        I: IntoIterator<Item = &'a Address>;

    /// Loads a readonly copy of the state of the receiver into the argument.
    fn state<S: DeserializeOwned>(&self) -> Result<S, ActorError>;

    /// Loads a mutable copy of the state of the receiver, passes it to `f`,
    /// and stores the result if `f` succeeds.
    ///
    /// Sending messages from within `f` is not allowed.
    fn transaction<S, RT, F>(&mut self, f: F) -> Result<RT, ActorError>
    where
        S: Serialize + DeserializeOwned,
        F: FnOnce(&mut S, &mut Self) -> Result<RT, ActorError>;

    /// Queues a message to an existing actor. Delivery happens after the current
    /// handler returns successfully; nothing is sent if it fails.
    fn send(
        &mut self,
        to: &Address,
        method: MethodNum,
        params: RawBytes,
        value: TokenAmount,
    ) -> Result<(), ActorError>;

    /// Like [`Runtime::send`], deploying the recipient described by `init` if it is absent.
    fn send_with_init(
        &mut self,
        init: StateInit,
        method: MethodNum,
        params: RawBytes,
        value: TokenAmount,
    ) -> Result<(), ActorError>;
}

/// Interface for invoking methods on an actor.
pub trait ActorCode {
    /// Encoded state of a freshly deployed actor, built from its constructor parameters.
    fn initial_state(data: &RawBytes) -> Result<RawBytes, ActorError>;

    /// Invokes method with runtime on the actor's code.
    fn invoke_method<RT: Runtime>(
        rt: &mut RT,
        method: MethodNum,
        params: &RawBytes,
    ) -> Result<(), ActorError>;
}

/// Deserializes method parameters, failing with `USR_SERIALIZATION`.
pub fn deserialize_params<O: DeserializeOwned>(params: &RawBytes) -> Result<O, ActorError> {
    params
        .deserialize()
        .map_err(|e| actor_error!(serialization; "failed to decode parameters: {}", e))
}

/// Encodes outbound method parameters.
pub fn serialize_params<P: Serialize>(params: &P) -> Result<RawBytes, ActorError> {
    RawBytes::serialize(params)
        .map_err(|e| actor_error!(serialization; "failed to encode parameters: {}", e))
}
