//! Vesting ratio reallocation engine
//!
//! Carves a fixed token amount out of an account's existing schedule for one
//! denomination and spreads it evenly across six new monthly cliffs (months
//! 4 through 9 after the genesis reference date), merging with any cliffs
//! already on those dates. Per-cliff ratios are truncated onto the 3-decimal
//! grid; the accumulated truncation error is folded into the last entry so
//! the ledger closes on exactly 1.
//!
//! This is a single-invocation operation: re-running it on an already
//! migrated schedule double-subtracts and double-inserts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    VestingError,
    calendar::cliff_epoch,
    ratio::{round3, truncate3},
    schedule::{Coin, DenomSchedule, assert_closed},
};

/// First month offset of the redistribution span.
const FIRST_MONTH: i32 = 4;
/// Last month offset of the redistribution span, inclusive.
const LAST_MONTH: i32 = 9;

/// A caller-supplied reallocation: carve `amount` of `denom` out of the
/// existing schedule and redistribute it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reallocation {
    /// Denomination whose schedule is rewritten
    pub denom: String,
    /// Absolute token amount to redistribute
    pub amount: u64,
}

/// Rewrites the vesting schedule for `request.denom`.
///
/// The reallocated fraction is `request.amount / original_vesting[denom]`.
/// Half of it is removed from each existing entry on the month +4 and +5
/// cliffs, and a sixth of it (truncated to the grid) is merged into each of
/// the month +4..=+9 cliffs. The schedule is re-sorted, the truncation
/// remainder is corrected on the last entry, and the closure invariant is
/// checked.
///
/// A denom present in `original_vesting` but without a schedule record is a
/// no-op. A denom missing from `original_vesting` is an input error.
pub fn change_vesting_schedule(
    original_vesting: &[Coin],
    vesting_schedules: &mut [DenomSchedule],
    request: &Reallocation,
    reference: DateTime<Utc>,
) -> Result<(), VestingError> {
    let original = original_vesting
        .iter()
        .find(|coin| coin.denom == request.denom)
        .ok_or_else(|| VestingError::UnknownDenom { denom: request.denom.clone() })?;
    if original.amount == 0 {
        return Err(VestingError::ZeroOriginalVesting { denom: request.denom.clone() });
    }

    // plain decimal division, not yet on the grid
    let ratio = Decimal::from(request.amount) / Decimal::from(original.amount);
    let half = ratio / Decimal::TWO;
    let single = truncate3(ratio / Decimal::from(LAST_MONTH - FIRST_MONTH + 1));

    let month_cliff = |months: i32| {
        cliff_epoch(reference, months)
            .ok_or(VestingError::CliffOutOfRange { reference: reference.timestamp(), months })
    };
    let early_cliff = month_cliff(FIRST_MONTH)?;
    let late_cliff = month_cliff(FIRST_MONTH + 1)?;

    for ledger in vesting_schedules.iter_mut().filter(|ledger| ledger.denom == request.denom) {
        // remove the reallocated ratio from the two schedule-defining early
        // cliffs; one subtraction per matching entry, untruncated
        for entry in &mut ledger.schedules {
            if entry.cliff == early_cliff || entry.cliff == late_cliff {
                entry.ratio -= half;
            }
        }

        // spread it evenly over the six monthly cliffs
        for months in FIRST_MONTH..=LAST_MONTH {
            ledger.entry_mut(month_cliff(months)?).merge_add(single);
        }

        ledger.sort_by_cliff();

        // fold the truncation remainder into the last entry
        let sum = ledger.ratio_sum();
        if let Some(last) = ledger.schedules.last_mut() {
            last.ratio = round3(last.ratio - (sum - Decimal::ONE));
        }

        assert_closed(ledger)?;

        debug!(
            target: "columbus::vesting",
            denom = %request.denom,
            %ratio,
            entries = ledger.schedules.len(),
            "reallocated vesting schedule"
        );
    }

    Ok(())
}
