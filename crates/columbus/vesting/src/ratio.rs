//! Fixed-point ratio helpers
//!
//! Every ratio stored in a schedule lives on a 3-decimal grid. Computed
//! ratios are *truncated* onto the grid, never rounded; the deficit that
//! truncation accumulates is repaired in one place, by the remainder
//! correction on the last schedule entry (see [`crate::realloc`]).

use rust_decimal::Decimal;

/// Number of fractional digits kept for stored ratios.
pub const DECIMAL_UNIT: u32 = 3;

/// Truncates `x` toward zero to [`DECIMAL_UNIT`] fractional digits.
///
/// For the non-negative ratios this crate handles, `truncate3(x) <= x` and
/// the difference is below 0.001.
pub fn truncate3(x: Decimal) -> Decimal {
    x.trunc_with_scale(DECIMAL_UNIT).normalize()
}

/// Rounds `x` to [`DECIMAL_UNIT`] fractional digits, ties to even.
///
/// Only the remainder-correction value goes through this; everything else
/// uses [`truncate3`].
pub fn round3(x: Decimal) -> Decimal {
    x.round_dp(DECIMAL_UNIT).normalize()
}

/// One unit in the last place of the 3-decimal grid.
pub fn grid_unit() -> Decimal {
    Decimal::new(1, DECIMAL_UNIT)
}
