// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use tracing_subscriber::{EnvFilter, prelude::*};

use crate::cli_shared::cli::{CliOpts, LogConfig};

/// Logs to `stderr`, keeping `stdout` free for command output.
pub fn setup_logger(opts: &CliOpts, log: &LogConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::Layer::new()
                .with_ansi(opts.color.coloring_enabled())
                .with_writer(std::io::stderr)
                .with_filter(get_env_filter(default_env_filter(log))),
        )
        .init();
}

/// Returns an [`EnvFilter`] according to the `RUST_LOG` environment variable, or a default
/// - see [`default_env_filter`]
fn get_env_filter(def: EnvFilter) -> EnvFilter {
    use std::env::{
        self,
        VarError::{NotPresent, NotUnicode},
    };
    match env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV) {
        Ok(s) => EnvFilter::new(s),
        Err(NotPresent) => def,
        Err(NotUnicode(_)) => EnvFilter::default(),
    }
}

fn default_env_filter(log: &LogConfig) -> EnvFilter {
    let configured = log.to_filter_string();
    let mut default_directives = vec!["info"];
    if !configured.is_empty() {
        default_directives.push(&configured);
    }
    EnvFilter::new(default_directives.join(","))
}

#[test]
fn test_default_env_filter() {
    let _did_not_panic = default_env_filter(&LogConfig::default());
}
