// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod address_cmd;
mod config_cmd;
mod scenario_cmd;

pub(super) use self::{
    address_cmd::AddressCommands, config_cmd::ConfigCommands, scenario_cmd::ScenarioCommand,
};
use crate::cli_shared::cli::CliOpts;
use clap::Parser;

/// CLI structure generated when interacting with the `agora` binary
#[derive(Parser)]
#[command(name = "agora", author = env!("CARGO_PKG_AUTHORS"), version, about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[command(flatten)]
    pub opts: CliOpts,
    #[command(subcommand)]
    pub cmd: Subcommand,
}

/// `agora` sub-commands available.
#[derive(clap::Subcommand, Debug)]
pub enum Subcommand {
    /// Inspect the ledger configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Derive actor addresses from their constructor parameters
    #[command(subcommand)]
    Address(AddressCommands),

    /// Run a scripted scenario against a fresh ledger
    Scenario(ScenarioCommand),
}
