// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::io::Write;

use anyhow::Context as _;
use clap::Subcommand;

use crate::cli_shared::cli::Config;

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Dump the effective configuration as TOML, in the same format as a configuration file
    Dump,
}

impl ConfigCommands {
    pub fn run<W: Write>(self, config: &Config, sink: &mut W) -> anyhow::Result<()> {
        match self {
            Self::Dump => {
                let text = toml::to_string(config).context("failed to serialize config")?;
                sink.write_all(text.as_bytes())?;
                Ok(())
            }
        }
    }
}
