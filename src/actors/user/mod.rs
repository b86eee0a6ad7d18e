// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Per-owner account actor: profile data and the entry point for every action
//! a person takes in the network.

mod state;
mod types;

use fvm_ipld_encoding::RawBytes;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use tracing::debug;

pub use self::state::State;
pub use self::types::*;
use crate::actor_error;
use crate::actors::{Deployable, Lifecycle, master, post};
use crate::error::ActorError;
use crate::message::{METHOD_CONSTRUCTOR, MethodNum};
use crate::runtime::{ActorCode, Runtime, deserialize_params, serialize_params};

/// User actor methods available
#[derive(FromPrimitive, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum Method {
    InitUser = METHOD_CONSTRUCTOR,
    ChangeAvatarUrl = 2,
    ChangeShortDescription = 3,
    CreatePost = 4,
    LikePost = 5,
    CommentPost = 6,
    InitVote = 7,
}

pub struct Actor;

impl Actor {
    /// Loads the state and checks the caller is the owner.
    fn validate_owner<RT: Runtime>(rt: &mut RT) -> Result<State, ActorError> {
        let st: State = rt.state()?;
        rt.validate_immediate_caller_is(std::iter::once(&st.user_address))?;
        Ok(st)
    }

    pub fn init_user<RT: Runtime>(rt: &mut RT, params: InitUserParams) -> Result<(), ActorError> {
        Self::validate_owner(rt)?;
        rt.transaction(|st: &mut State, _| {
            st.require_uninitialized()?;
            st.name = params.name;
            st.short_description = params.short_description;
            st.avatar_url = params.avatar_url;
            st.age = params.age;
            st.post_index = 0;
            st.initialized = true;
            debug!(user = %st.user_address.short(), name = %st.name, "user initialized");
            Ok(())
        })
    }

    pub fn change_avatar_url<RT: Runtime>(
        rt: &mut RT,
        params: ChangeAvatarUrlParams,
    ) -> Result<(), ActorError> {
        Self::validate_owner(rt)?;
        rt.transaction(|st: &mut State, _| {
            st.require_initialized()?;
            st.avatar_url = params.avatar_url;
            Ok(())
        })
    }

    pub fn change_short_description<RT: Runtime>(
        rt: &mut RT,
        params: ChangeShortDescriptionParams,
    ) -> Result<(), ActorError> {
        Self::validate_owner(rt)?;
        rt.transaction(|st: &mut State, _| {
            st.require_initialized()?;
            st.short_description = params.short_description;
            Ok(())
        })
    }

    /// Deploys the next post of this user, forwarding the attached value to it.
    pub fn create_post<RT: Runtime>(
        rt: &mut RT,
        params: CreatePostParams,
    ) -> Result<(), ActorError> {
        Self::validate_owner(rt)?;
        let post = rt.transaction(|st: &mut State, _| {
            st.require_initialized()?;
            Ok(post::ConstructorParams {
                master: st.master_address,
                author: st.user_address,
                post_index: st.next_post_index(),
            })
        })?;

        debug!(post_index = post.post_index, "creating post");
        let value = rt.message().value_received().clone();
        rt.send_with_init(
            post.state_init()?,
            post::Method::InitPost as u64,
            serialize_params(&post::InitPostParams {
                query_id: params.query_id,
                title: params.title,
                text: params.text,
            })?,
            value,
        )
    }

    pub fn like_post<RT: Runtime>(rt: &mut RT, params: LikePostParams) -> Result<(), ActorError> {
        let st = Self::validate_owner(rt)?;
        st.require_initialized()?;

        let target = post::ConstructorParams {
            master: st.master_address,
            author: params.author,
            post_index: params.post_id,
        }
        .address()?;
        let value = rt.message().value_received().clone();
        rt.send(
            &target,
            post::Method::PostLiked as u64,
            serialize_params(&post::PostLikedParams {
                query_id: params.query_id,
                user: st.user_address,
            })?,
            value,
        )
    }

    pub fn comment_post<RT: Runtime>(
        rt: &mut RT,
        params: CommentPostParams,
    ) -> Result<(), ActorError> {
        let st = Self::validate_owner(rt)?;
        st.require_initialized()?;

        let target = post::ConstructorParams {
            master: st.master_address,
            author: params.author,
            post_index: params.post_id,
        }
        .address()?;
        let value = rt.message().value_received().clone();
        rt.send(
            &target,
            post::Method::PostCommented as u64,
            serialize_params(&post::PostCommentedParams {
                query_id: params.query_id,
                user: st.user_address,
                text: params.text,
            })?,
            value,
        )
    }

    /// Relays the owner's vote to the master.
    pub fn init_vote<RT: Runtime>(rt: &mut RT, params: InitVoteParams) -> Result<(), ActorError> {
        let st = Self::validate_owner(rt)?;
        st.require_initialized()?;

        let value = rt.message().value_received().clone();
        rt.send(
            &st.master_address,
            master::Method::Vote as u64,
            serialize_params(&master::VoteParams {
                query_id: params.query_id,
                user: st.user_address,
                vote: params.vote,
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
            Some(Method::InitUser) => Self::init_user(rt, deserialize_params(params)?),
            Some(Method::ChangeAvatarUrl) => Self::change_avatar_url(rt, deserialize_params(params)?),
            Some(Method::ChangeShortDescription) => {
                Self::change_short_description(rt, deserialize_params(params)?)
            }
            Some(Method::CreatePost) => Self::create_post(rt, deserialize_params(params)?),
            Some(Method::LikePost) => Self::like_post(rt, deserialize_params(params)?),
            Some(Method::CommentPost) => Self::comment_post(rt, deserialize_params(params)?),
            Some(Method::InitVote) => Self::init_vote(rt, deserialize_params(params)?),
            None => Err(actor_error!(unhandled_message; "invalid method: {}", method)),
        }
    }
}
