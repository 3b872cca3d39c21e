//! Columbus genesis document migration
//!
//! Reads an exported genesis JSON document, applies the vesting-schedule
//! reallocation of [`columbus_vesting`] to the accounts named in a CSV row
//! file, stamps the new chain id and genesis time, and re-emits the
//! document. Everything the migration does not touch round-trips untouched.
//!
//! The whole transform is offline and one-shot: any error is fatal and no
//! output document is produced for a partially migrated state.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod document;
pub mod migrate;
pub mod rows;

pub use document::{Account, AppState, GenesisDocument};
pub use migrate::{MigrateOptions, MigrateSummary, apply_substitutions, migrate};
pub use rows::{VestingRow, read_rows};

use columbus_vesting::VestingError;
use thiserror::Error;

/// Errors produced while loading, migrating, or emitting a genesis document
#[derive(Debug, Error)]
pub enum GenesisError {
    /// Filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document's `genesis_time` is not a valid RFC 3339 timestamp
    #[error("invalid genesis_time {value:?}: {source}")]
    InvalidGenesisTime {
        /// The offending timestamp text
        value: String,
        /// Parse failure detail
        #[source]
        source: chrono::ParseError,
    },

    /// The requested chain id is blank
    #[error("chain-id required")]
    EmptyChainId,

    /// A vesting CSV record does not have exactly three fields
    #[error("invalid csv format at line {line}: expected address,denom,amount")]
    MalformedRow {
        /// 1-based line number of the bad record
        line: u64,
    },

    /// A vesting CSV amount field is not a plain integer
    #[error("invalid amount {value:?} at line {line}")]
    InvalidAmount {
        /// 1-based line number of the bad record
        line: u64,
        /// The offending amount text
        value: String,
    },

    /// CSV reader failure
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The reallocation engine rejected an account's schedule
    #[error("account {address}: {source}")]
    Vesting {
        /// Address of the account being migrated
        address: String,
        /// Engine failure detail
        #[source]
        source: VestingError,
    },
}
