// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! A small social network run by four cooperating actors on an in-process ledger.
//!
//! A [`Master`](actors::master) holds the treasury and the per-like and per-comment
//! prices. Each account owns one [`User`](actors::user) actor, every post is its own
//! [`Post`](actors::post) actor and every comment its own
//! [`Comment`](actors::comment) actor. Actors only ever talk through messages
//! delivered by the [`Ledger`](interpreter::Ledger), and every address is derived from
//! the actor's code and constructor parameters, so any party can compute where an
//! actor lives and check who is calling.

pub mod actors;
pub mod address;
pub mod cli;
pub mod cli_shared;
pub mod clock;
pub mod econ;
pub mod error;
pub mod interpreter;
pub mod message;
pub mod runtime;
pub mod scenario;
pub mod state_tree;
pub mod utils;
