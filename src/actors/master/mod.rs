// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Protocol registry: holds the treasury, pays authors for their posts, and runs
//! the votes that change the prices it pays.

mod state;
mod types;

use fvm_ipld_encoding::RawBytes;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use tracing::{debug, info};

pub use self::state::{State, VotingOutcome, VotingState};
pub use self::types::*;
use crate::actor_error;
use crate::actors::{Deployable, Lifecycle, post, user};
use crate::error::ActorError;
use crate::message::{METHOD_CONSTRUCTOR, METHOD_SEND, MethodNum};
use crate::runtime::{ActorCode, Runtime, deserialize_params, serialize_params};

/// Master actor methods available
#[derive(FromPrimitive, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum Method {
    Send = METHOD_SEND,
    Deploy = METHOD_CONSTRUCTOR,
    ClaimPayment = 2,
    StartVoting = 3,
    Vote = 4,
    EndVoting = 5,
}

pub struct Actor;

impl Actor {
    fn validate_admin<RT: Runtime>(rt: &mut RT) -> Result<(), ActorError> {
        let st: State = rt.state()?;
        rt.validate_immediate_caller_is(std::iter::once(&st.admin_address))
    }

    /// Treasury top-up. Accepted from anyone at any time.
    pub fn receive<RT: Runtime>(rt: &mut RT) -> Result<(), ActorError> {
        rt.validate_immediate_caller_accept_any()
    }

    pub fn deploy<RT: Runtime>(rt: &mut RT, _params: DeployParams) -> Result<(), ActorError> {
        Self::validate_admin(rt)?;
        rt.transaction(|st: &mut State, _| {
            st.require_uninitialized()?;
            st.initialized = true;
            Ok(())
        })?;
        info!(master = %rt.message().receiver(), "master deployed");
        Ok(())
    }

    /// Pays the author of a post for the likes and comments it reports.
    pub fn claim_payment<RT: Runtime>(
        rt: &mut RT,
        params: ClaimPaymentParams,
    ) -> Result<(), ActorError> {
        let post_actor = post::ConstructorParams {
            master: *rt.message().receiver(),
            author: params.author,
            post_index: params.post_index,
        }
        .address()?;
        rt.validate_immediate_caller_is(std::iter::once(&post_actor))?;

        let st: State = rt.state()?;
        st.require_initialized()?;
        let payout = st.payout(params.comments_count, params.likes_count);
        debug!(
            author = %params.author.short(),
            post_index = params.post_index,
            %payout,
            "paying author"
        );
        if payout.is_zero() {
            return Ok(());
        }
        rt.send(&params.author, METHOD_SEND, RawBytes::default(), payout)
    }

    pub fn start_voting<RT: Runtime>(
        rt: &mut RT,
        params: StartVotingParams,
    ) -> Result<(), ActorError> {
        Self::validate_admin(rt)?;
        let now = rt.tx_time();
        rt.transaction(|st: &mut State, _| {
            st.require_initialized()?;
            st.start_voting(
                now,
                params.new_price_for_like,
                params.new_price_for_comment,
            )
        })?;
        info!(started = now, "voting started");
        Ok(())
    }

    pub fn vote<RT: Runtime>(rt: &mut RT, params: VoteParams) -> Result<(), ActorError> {
        let user_actor = user::ConstructorParams {
            master: *rt.message().receiver(),
            owner: params.user,
        }
        .address()?;
        rt.validate_immediate_caller_is(std::iter::once(&user_actor))?;

        let now = rt.tx_time();
        rt.transaction(|st: &mut State, _| {
            st.require_initialized()?;
            st.record_vote(now, params.user, params.vote)
        })
    }

    pub fn end_voting<RT: Runtime>(rt: &mut RT, _params: EndVotingParams) -> Result<(), ActorError> {
        rt.validate_immediate_caller_accept_any()?;
        let now = rt.tx_time();
        let (outcome, st) = rt.transaction(|st: &mut State, _| {
            st.require_initialized()?;
            let outcome = st.end_voting(now)?;
            Ok((outcome, st.clone()))
        })?;
        match outcome {
            VotingOutcome::Accepted { .. } => info!(
                price_for_like = %st.price_for_like,
                price_for_comment = %st.price_for_comment,
                "voting accepted new prices"
            ),
            VotingOutcome::Rejected => info!("voting rejected new prices"),
        }
        Ok(())
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
            Some(Method::Send) => Self::receive(rt),
            Some(Method::Deploy) => Self::deploy(rt, deserialize_params(params)?),
            Some(Method::ClaimPayment) => Self::claim_payment(rt, deserialize_params(params)?),
            Some(Method::StartVoting) => Self::start_voting(rt, deserialize_params(params)?),
            Some(Method::Vote) => Self::vote(rt, deserialize_params(params)?),
            Some(Method::EndVoting) => Self::end_voting(rt, deserialize_params(params)?),
            None => Err(actor_error!(unhandled_message; "invalid method: {}", method)),
        }
    }
}
