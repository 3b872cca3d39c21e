//! Per-denomination vesting schedule ledger

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::{VestingError, ratio};

/// An `original_vesting` record: the absolute token amount backing ratio 1.0
/// for one denomination.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Token denomination, e.g. `uluna`
    pub denom: String,
    /// Absolute amount in the smallest unit, string-encoded in JSON
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u64,
}

/// One cliff unlock: at `cliff` (epoch seconds), `ratio` of the original
/// vesting amount becomes vested.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Unlock instant as epoch seconds, string-encoded in JSON
    #[serde_as(as = "DisplayFromStr")]
    pub cliff: i64,
    /// Fraction of the original vesting amount, on the 3-decimal grid
    pub ratio: Decimal,
}

impl ScheduleEntry {
    /// Adds `delta` to this entry's ratio through the fixed-point grid.
    pub fn merge_add(&mut self, delta: Decimal) {
        self.ratio = ratio::truncate3(self.ratio + delta);
    }
}

/// The ordered cliff ledger for one denomination of one account.
///
/// At most one entry exists per distinct cliff. When the ledger is closed
/// (after an engine run) the ratios sum to exactly 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomSchedule {
    /// Token denomination this ledger applies to
    pub denom: String,
    /// Cliff entries, ascending by cliff once sorted
    pub schedules: Vec<ScheduleEntry>,
}

impl DenomSchedule {
    /// Creates an empty ledger for `denom`.
    pub fn new(denom: impl Into<String>) -> Self {
        Self { denom: denom.into(), schedules: Vec::new() }
    }

    /// Returns the entry for `cliff`, appending a zero-ratio entry if absent.
    pub fn entry_mut(&mut self, cliff: i64) -> &mut ScheduleEntry {
        match self.schedules.iter().position(|entry| entry.cliff == cliff) {
            Some(idx) => &mut self.schedules[idx],
            None => {
                self.schedules.push(ScheduleEntry { cliff, ratio: Decimal::ZERO });
                let last = self.schedules.len() - 1;
                &mut self.schedules[last]
            }
        }
    }

    /// Looks up the entry for `cliff`.
    pub fn entry(&self, cliff: i64) -> Option<&ScheduleEntry> {
        self.schedules.iter().find(|entry| entry.cliff == cliff)
    }

    /// Sorts entries ascending by cliff.
    ///
    /// The historical migration sorted the string form of the cliff; numeric
    /// order is equivalent for fixed-width epoch text.
    pub fn sort_by_cliff(&mut self) {
        self.schedules.sort_by_key(|entry| entry.cliff);
    }

    /// Sum of all entry ratios.
    pub fn ratio_sum(&self) -> Decimal {
        self.schedules.iter().map(|entry| entry.ratio).sum()
    }
}

/// Checks that a ledger is closed: its ratios sum to 1, within one unit of
/// the 3-decimal grid.
///
/// A violation here after remainder correction indicates corrupt input or a
/// programming error; callers abort the whole migration on it.
pub fn assert_closed(schedule: &DenomSchedule) -> Result<(), VestingError> {
    let sum = schedule.ratio_sum();
    if (sum - Decimal::ONE).abs() > ratio::grid_unit() {
        return Err(VestingError::InvariantViolation { sum });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(cliff: i64, ratio: Decimal) -> ScheduleEntry {
        ScheduleEntry { cliff, ratio }
    }

    #[test]
    fn test_entry_mut_appends_once() {
        let mut ledger = DenomSchedule::new("uluna");
        ledger.entry_mut(1558677600).ratio = dec!(0.3);
        ledger.entry_mut(1558677600).merge_add(dec!(0.05));

        assert_eq!(ledger.schedules.len(), 1);
        assert_eq!(ledger.entry(1558677600).unwrap().ratio, dec!(0.35));
    }

    #[test]
    fn test_merge_add_truncates() {
        let mut e = entry(0, dec!(0.15));
        e.merge_add(dec!(0.1) / dec!(6));
        assert_eq!(e.ratio, dec!(0.166));
    }

    #[test]
    fn test_sort_by_cliff() {
        let mut ledger = DenomSchedule::new("uluna");
        ledger.schedules = vec![
            entry(1563948000, dec!(0.1)),
            entry(1558677600, dec!(0.2)),
            entry(1561356000, dec!(0.7)),
        ];
        ledger.sort_by_cliff();

        let cliffs: Vec<i64> = ledger.schedules.iter().map(|e| e.cliff).collect();
        assert_eq!(cliffs, vec![1558677600, 1561356000, 1563948000]);
    }

    #[test]
    fn test_assert_closed() {
        let mut ledger = DenomSchedule::new("uluna");
        ledger.schedules = vec![entry(1, dec!(0.3)), entry(2, dec!(0.7))];
        assert!(assert_closed(&ledger).is_ok());

        // one grid unit off still closes
        ledger.schedules[1].ratio = dec!(0.701);
        assert!(assert_closed(&ledger).is_ok());

        ledger.schedules[1].ratio = dec!(0.702);
        let err = assert_closed(&ledger).unwrap_err();
        assert!(matches!(err, VestingError::InvariantViolation { sum } if sum == dec!(1.002)));
    }

    #[test]
    fn test_entry_json_shape() {
        let e = entry(1558677600, dec!(0.05));
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, r#"{"cliff":"1558677600","ratio":"0.05"}"#);

        let back: ScheduleEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn test_coin_json_shape() {
        let coin = Coin { denom: "uluna".to_string(), amount: 1_000_000_000 };
        let json = serde_json::to_string(&coin).unwrap();
        assert_eq!(json, r#"{"denom":"uluna","amount":"1000000000"}"#);
    }
}
