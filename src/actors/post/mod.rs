// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod state;
mod types;

use fvm_ipld_encoding::RawBytes;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use tracing::debug;

pub use self::state::State;
pub use self::types::*;
use crate::actor_error;
use crate::actors::{Deployable, Lifecycle, comment, master, user};
use crate::address::Address;
use crate::error::ActorError;
use crate::message::{METHOD_CONSTRUCTOR, MethodNum};
use crate::runtime::{ActorCode, Runtime, deserialize_params, serialize_params};

/// Post actor methods available
#[derive(FromPrimitive, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum Method {
    InitPost = METHOD_CONSTRUCTOR,
    PostLiked = 2,
    PostCommented = 3,
    InitClaimPayment = 4,
}

pub struct Actor;

impl Actor {
    /// Checks the caller is the User actor of `owner` registered under this post's master.
    fn validate_user_actor<RT: Runtime>(
        rt: &mut RT,
        master: Address,
        owner: Address,
    ) -> Result<(), ActorError> {
        let user_actor = user::ConstructorParams { master, owner }.address()?;
        rt.validate_immediate_caller_is(std::iter::once(&user_actor))
    }

    pub fn init_post<RT: Runtime>(rt: &mut RT, params: InitPostParams) -> Result<(), ActorError> {
        let st: State = rt.state()?;
        Self::validate_user_actor(rt, st.master_address, st.author_address)?;
        rt.transaction(|st: &mut State, _| {
            st.require_uninitialized()?;
            st.title = params.title;
            st.text = params.text;
            st.initialized = true;
            debug!(author = %st.author_address.short(), post_index = st.post_index, "post initialized");
            Ok(())
        })
    }

    pub fn post_liked<RT: Runtime>(rt: &mut RT, params: PostLikedParams) -> Result<(), ActorError> {
        let st: State = rt.state()?;
        Self::validate_user_actor(rt, st.master_address, params.user)?;
        rt.transaction(|st: &mut State, _| {
            st.require_initialized()?;
            st.likes_count += 1;
            Ok(())
        })
    }

    /// Deploys the next comment of this post, forwarding the attached value to it.
    pub fn post_commented<RT: Runtime>(
        rt: &mut RT,
        params: PostCommentedParams,
    ) -> Result<(), ActorError> {
        let st: State = rt.state()?;
        Self::validate_user_actor(rt, st.master_address, params.user)?;
        let comment = rt.transaction(|st: &mut State, _| {
            st.require_initialized()?;
            Ok(comment::ConstructorParams {
                master: st.master_address,
                author: st.author_address,
                commenter: params.user,
                post_index: st.post_index,
                comment_index: st.next_comment_index(),
            })
        })?;

        let value = rt.message().value_received().clone();
        rt.send_with_init(
            comment.state_init()?,
            comment::Method::InitComment as u64,
            serialize_params(&comment::InitCommentParams {
                query_id: params.query_id,
                text: params.text,
            })?,
            value,
        )
    }

    /// Marks accrued likes and comments as paid and asks the master to pay the author.
    pub fn init_claim_payment<RT: Runtime>(
        rt: &mut RT,
        params: InitClaimPaymentParams,
    ) -> Result<(), ActorError> {
        let st: State = rt.state()?;
        rt.validate_immediate_caller_is(std::iter::once(&st.author_address))?;
        let unpaid = rt.transaction(|st: &mut State, _| {
            st.require_initialized()?;
            st.take_unpaid()
        })?;

        debug!(
            post_index = st.post_index,
            likes = unpaid.likes,
            comments = unpaid.comments,
            "claiming payment"
        );
        let value = rt.message().value_received().clone();
        rt.send(
            &st.master_address,
            master::Method::ClaimPayment as u64,
            serialize_params(&master::ClaimPaymentParams {
                query_id: params.query_id,
                author: st.author_address,
                comments_count: unpaid.comments,
                likes_count: unpaid.likes,
                post_index: st.post_index,
            })?,
            value,
        )
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
            Some(Method::InitPost) => Self::init_post(rt, deserialize_params(params)?),
            Some(Method::PostLiked) => Self::post_liked(rt, deserialize_params(params)?),
            Some(Method::PostCommented) => Self::post_commented(rt, deserialize_params(params)?),
            Some(Method::InitClaimPayment) => {
                Self::init_claim_payment(rt, deserialize_params(params)?)
            }
            None => Err(actor_error!(unhandled_message; "invalid method: {}", method)),
        }
    }
}
