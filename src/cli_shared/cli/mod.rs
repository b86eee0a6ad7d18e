// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod config;

use std::path::PathBuf;

pub use self::config::*;
use crate::utils::misc::LoggingColor;

/// Environment variable pointing at a configuration file.
pub const CONFIG_PATH_ENV: &str = "AGORA_CONFIG_PATH";

/// Options shared by every `agora` command.
#[derive(Default, Debug, clap::Args)]
pub struct CliOpts {
    /// A TOML file containing relevant configurations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Enable or disable colored logging in `stderr`
    #[arg(long, global = true, default_value_t = LoggingColor::Auto)]
    pub color: LoggingColor,
}

/// Where the configuration file was found.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigPath {
    Cli(PathBuf),
    Env(PathBuf),
}

impl ConfigPath {
    pub fn to_path_buf(&self) -> &PathBuf {
        match self {
            ConfigPath::Cli(path) | ConfigPath::Env(path) => path,
        }
    }
}

/// Command line path first, then the `AGORA_CONFIG_PATH` environment variable.
pub fn find_config_path(config: Option<&PathBuf>) -> Option<ConfigPath> {
    if let Some(path) = config {
        return Some(ConfigPath::Cli(path.clone()));
    }
    std::env::var_os(CONFIG_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(|v| ConfigPath::Env(PathBuf::from(v)))
}
