// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::ffi::OsString;

use clap::Parser;
use tracing::debug;

use super::subcommands::{Cli, Subcommand};
use crate::cli_shared::{logger, read_config};

pub fn main<ArgT>(args: impl IntoIterator<Item = ArgT>) -> anyhow::Result<()>
where
    ArgT: Into<OsString> + Clone,
{
    // Capture Cli inputs
    let Cli { opts, cmd } = Cli::parse_from(args);

    let (config_path, config) = read_config(opts.config.as_ref())?;
    logger::setup_logger(&opts, &config.log);
    if let Some(path) = &config_path {
        debug!(path = %path.to_path_buf().display(), "using configuration file");
    }

    let stdout = &mut std::io::stdout();
    match cmd {
        Subcommand::Config(cmd) => cmd.run(&config, stdout),
        Subcommand::Address(cmd) => cmd.run(stdout),
        Subcommand::Scenario(cmd) => cmd.run(&config, stdout),
    }
}
