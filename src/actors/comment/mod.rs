// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod state;
mod types;

use fvm_ipld_encoding::RawBytes;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

pub use self::state::State;
pub use self::types::*;
use crate::actor_error;
use crate::actors::{Deployable, Lifecycle, post};
use crate::error::ActorError;
use crate::message::{METHOD_CONSTRUCTOR, MethodNum};
use crate::runtime::{ActorCode, Runtime, deserialize_params, serialize_params};

/// Comment actor methods available
#[derive(FromPrimitive, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum Method {
    InitComment = METHOD_CONSTRUCTOR,
}

pub struct Actor;

impl Actor {
    /// Only the post this comment belongs to may initialize it.
    pub fn init_comment<RT: Runtime>(
        rt: &mut RT,
        params: InitCommentParams,
    ) -> Result<(), ActorError> {
        let st: State = rt.state()?;
        let parent = post::ConstructorParams {
            master: st.master_address,
            author: st.author_address,
            post_index: st.post_index,
        }
        .address()?;
        rt.validate_immediate_caller_is(std::iter::once(&parent))?;
        rt.transaction(|st: &mut State, _| {
            st.require_uninitialized()?;
            st.text = params.text;
            st.initialized = true;
            Ok(())
        })
    }
}

impl ActorCode for Actor {
    fn initial_state(data: &RawBytes) -> Result<RawBytes, ActorError> {
        let params: ConstructorParams = deserialize_params(data)?;
        serialize_params(&State::new(&params))
    }

    fn invoke_method<RT: Runtime>(
        rt: &mut RT,
        method: MethodNum,
        params: &RawBytes,
    ) -> Result<(), ActorError> {
        match FromPrimitive::from_u64(method) {
            Some(Method::InitComment) => Self::init_comment(rt, deserialize_params(params)?),
            None => Err(actor_error!(unhandled_message; "invalid method: {}", method)),
        }
    }
}
