//! Calendar month arithmetic for cliff dates
//!
//! Cliff timestamps for the migration are always "the genesis date, N months
//! later": same day-of-month and time-of-day, with month overflow carried
//! into the year.

use chrono::{DateTime, Months, Utc};

/// Shifts `reference` by `n` calendar months, keeping the day-of-month and
/// time-of-day. Returns `None` only if the result leaves chrono's
/// representable date range.
///
/// If the target month is too short for the reference day (e.g. Jan 31
/// shifted one month), chrono clamps to the last day of the target month.
/// This is an accepted edge case; the migration's reference dates fall on
/// day 24 and never trigger it.
pub fn add_months(reference: DateTime<Utc>, n: i32) -> Option<DateTime<Utc>> {
    if n >= 0 {
        reference.checked_add_months(Months::new(n as u32))
    } else {
        reference.checked_sub_months(Months::new(n.unsigned_abs()))
    }
}

/// Epoch seconds of `reference` shifted by `n` calendar months.
pub fn cliff_epoch(reference: DateTime<Utc>, n: i32) -> Option<i64> {
    add_months(reference, n).map(|date| date.timestamp())
}
