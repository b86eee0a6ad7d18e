// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Plain wallet. Holds a balance and accepts any message from anyone.

use fvm_ipld_encoding::RawBytes;

use crate::error::ActorError;
use crate::message::MethodNum;
use crate::runtime::{ActorCode, Runtime};

pub struct Actor;

impl ActorCode for Actor {
    fn initial_state(_data: &RawBytes) -> Result<RawBytes, ActorError> {
        Ok(RawBytes::default())
    }

    fn invoke_method<RT: Runtime>(
        rt: &mut RT,
        _method: MethodNum,
        _params: &RawBytes,
    ) -> Result<(), ActorError> {
        rt.validate_immediate_caller_accept_any()
    }
}
