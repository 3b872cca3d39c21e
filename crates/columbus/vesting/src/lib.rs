//! Columbus vesting schedule reallocation
//!
//! This crate implements the vesting-schedule rewrite applied during the
//! columbus chain upgrade. Each vesting account releases its
//! `original_vesting` balance according to a per-denomination schedule of
//! cliff unlocks, each carrying a fraction ("ratio") of the total; the
//! ratios of a closed schedule always sum to exactly 1.
//!
//! The upgrade carves a fixed token amount out of an account's existing
//! schedule and spreads it evenly over six new monthly cliffs, merging with
//! whatever cliffs already exist on those dates. See
//! [`change_vesting_schedule`] for the exact algorithm.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod calendar;
pub mod ratio;
pub mod realloc;
pub mod schedule;
pub mod window;

pub use realloc::{Reallocation, change_vesting_schedule};
pub use schedule::{Coin, DenomSchedule, ScheduleEntry, assert_closed};
pub use window::{WindowEntry, WindowSchedule};

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced by the reallocation engine
#[derive(Debug, Error)]
pub enum VestingError {
    /// No `original_vesting` record exists for the requested denom
    #[error("invalid account or denom: no original vesting for {denom}")]
    UnknownDenom {
        /// Requested denomination
        denom: String,
    },

    /// The `original_vesting` amount for the denom is zero
    #[error("original vesting amount for {denom} is zero")]
    ZeroOriginalVesting {
        /// Requested denomination
        denom: String,
    },

    /// Month arithmetic left the representable date range
    #[error("cliff date out of range: {reference} + {months} months")]
    CliffOutOfRange {
        /// Reference instant as epoch seconds
        reference: i64,
        /// Month offset that overflowed
        months: i32,
    },

    /// Schedule ratios do not sum to 1 after remainder correction
    #[error("{sum}, invariant failed")]
    InvariantViolation {
        /// The computed ratio sum
        sum: Decimal,
    },
}
