// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context as _;

use crate::cli_shared::cli::Config;
use crate::interpreter::Ledger;
use crate::scenario::{Scenario, ScenarioRunner};

/// Prints one JSON line per step, followed by one per touched actor.
#[derive(Debug, clap::Args)]
pub struct ScenarioCommand {
    /// TOML file with the `[[step]]` list to run
    pub file: PathBuf,
    /// Skip the final actor records
    #[arg(long)]
    pub no_records: bool,
}

impl ScenarioCommand {
    pub fn run<W: Write>(self, config: &Config, sink: &mut W) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;
        let scenario = Scenario::from_toml(&text)
            .with_context(|| format!("in {}", self.file.display()))?;

        let mut runner = ScenarioRunner::new(Ledger::new(config.ledger.clone()));
        for (i, step) in scenario.steps.iter().enumerate() {
            let report = runner.run_step(i + 1, step)?;
            serde_json::to_writer(&mut *sink, &report)?;
            writeln!(sink)?;
        }
        if !self.no_records {
            for record in runner.records()? {
                serde_json::to_writer(&mut *sink, &record)?;
                writeln!(sink)?;
            }
        }
        Ok(())
    }
}
