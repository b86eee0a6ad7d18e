// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

/// Unix time in seconds, as seen by actors.
pub type Timestamp = u64;

/// Length of a voting window and of the cooldown between windows.
pub const SECONDS_IN_DAY: Timestamp = 24 * 60 * 60;

/// Current wall clock time.
pub fn wall_clock() -> Timestamp {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}
