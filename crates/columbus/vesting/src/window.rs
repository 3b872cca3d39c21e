//! Window vesting schedules
//!
//! The later chain upgrade replaces instant cliff unlocks with vesting
//! *windows*: within `[start_time, end_time)` the entry's ratio vests
//! linearly, and is fully vested from `end_time` on. A cliff ledger converts
//! to a window schedule by giving every cliff a one-month window.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::schedule::DenomSchedule;

/// Seconds in one 30-day schedule month.
pub const SECONDS_PER_MONTH: i64 = 30 * 24 * 60 * 60;

/// One vesting window: `ratio` of the original vesting amount vests linearly
/// between `start_time` and `end_time`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEntry {
    /// Window start as epoch seconds, string-encoded in JSON
    #[serde_as(as = "DisplayFromStr")]
    pub start_time: i64,
    /// Window end as epoch seconds, string-encoded in JSON
    #[serde_as(as = "DisplayFromStr")]
    pub end_time: i64,
    /// Fraction of the original vesting amount released by this window
    pub ratio: Decimal,
}

impl WindowEntry {
    /// A window is valid if it starts at or after the epoch, does not end
    /// before it starts, and releases a positive ratio.
    pub fn is_valid(&self) -> bool {
        self.start_time >= 0 && self.end_time >= self.start_time && self.ratio > Decimal::ZERO
    }
}

/// The window ledger for one denomination of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSchedule {
    /// Token denomination this ledger applies to
    pub denom: String,
    /// Vesting windows, ascending by start time
    #[serde(rename = "schedules")]
    pub windows: Vec<WindowEntry>,
}

impl WindowSchedule {
    /// A window schedule is valid if every window is valid and the ratios
    /// sum to exactly 1.
    pub fn is_valid(&self) -> bool {
        let mut sum = Decimal::ZERO;
        for window in &self.windows {
            if !window.is_valid() {
                return false;
            }
            sum += window.ratio;
        }
        sum == Decimal::ONE
    }

    /// Ratio of tokens vested by `block_time`: full ratio for windows that
    /// have ended, linear interpolation inside an open window.
    pub fn vested_ratio(&self, block_time: i64) -> Decimal {
        let mut sum = Decimal::ZERO;
        for window in &self.windows {
            if block_time < window.start_time {
                continue;
            }
            if block_time < window.end_time {
                sum += window.ratio * Decimal::from(block_time - window.start_time)
                    / Decimal::from(window.end_time - window.start_time);
            } else {
                sum += window.ratio;
            }
        }
        sum
    }
}

impl DenomSchedule {
    /// Converts a cliff ledger into a window schedule, giving every cliff a
    /// window of `window_secs` starting at the cliff instant.
    pub fn into_windows(self, window_secs: i64) -> WindowSchedule {
        WindowSchedule {
            denom: self.denom,
            windows: self
                .schedules
                .into_iter()
                .map(|entry| WindowEntry {
                    start_time: entry.cliff,
                    end_time: entry.cliff + window_secs,
                    ratio: entry.ratio,
                })
                .collect(),
        }
    }
}
