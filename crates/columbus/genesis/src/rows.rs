//! Vesting reallocation rows
//!
//! The migration is driven by a headerless CSV of
//! `address,denom,amount` rows, historically maintained next to the upgrade
//! plan. Row shape is validated up front: a bad row aborts the run before
//! any account is touched.

use columbus_vesting::Reallocation;
use std::io::Read;
use std::path::Path;

use crate::GenesisError;

/// One reallocation instruction: carve `amount` of `denom` out of the
/// schedule of the account at `address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VestingRow {
    /// Bech32 address of the affected account
    pub address: String,
    /// Denomination to reallocate
    pub denom: String,
    /// Absolute token amount to reallocate
    pub amount: u64,
}

impl VestingRow {
    /// The engine request this row describes.
    pub fn request(&self) -> Reallocation {
        Reallocation { denom: self.denom.clone(), amount: self.amount }
    }
}

/// Reads reallocation rows from a headerless CSV file.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<VestingRow>, GenesisError> {
    read_rows_from(std::fs::File::open(path)?)
}

/// Reads reallocation rows from any CSV source.
pub fn read_rows_from(reader: impl Read) -> Result<Vec<VestingRow>, GenesisError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |pos| pos.line());
        if record.len() != 3 {
            return Err(GenesisError::MalformedRow { line });
        }
        let amount = record[2]
            .parse()
            .map_err(|_| GenesisError::InvalidAmount { line, value: record[2].to_string() })?;
        rows.push(VestingRow {
            address: record[0].to_string(),
            denom: record[1].to_string(),
            amount,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_rows() {
        let csv = "terra1aaa,uluna,300000000\nterra1bbb,uluna,125000000\n";
        let rows = read_rows_from(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            VestingRow {
                address: "terra1aaa".to_string(),
                denom: "uluna".to_string(),
                amount: 300_000_000,
            }
        );
    }

    #[test]
    fn test_wrong_field_count_is_fatal() {
        let csv = "terra1aaa,uluna,300000000\nterra1bbb,uluna\n";
        let err = read_rows_from(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, GenesisError::MalformedRow { line: 2 }));
    }

    #[test]
    fn test_bad_amount_is_fatal() {
        let csv = "terra1aaa,uluna,lots\n";
        let err = read_rows_from(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, GenesisError::InvalidAmount { line: 1, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(read_rows_from(&b""[..]).unwrap().is_empty());
    }
}
