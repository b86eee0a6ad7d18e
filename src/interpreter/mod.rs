// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod default_runtime;
mod vm;

use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::econ::TokenAmount;

pub use self::vm::*;

/// Ledger parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Initial ledger time. Wall clock time when unset.
    pub genesis_time: Option<Timestamp>,
    /// Balance of every wallet created with [`Ledger::treasury`].
    pub treasury_balance: TokenAmount,
    /// Upper bound on the number of deliveries triggered by one external message.
    pub max_transactions: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            genesis_time: None,
            treasury_balance: TokenAmount::from_whole(1_000_000),
            max_transactions: 10_000,
        }
    }
}
