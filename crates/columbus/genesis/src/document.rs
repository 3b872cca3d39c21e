//! Typed view of an exported genesis document
//!
//! Only the fields the migration touches are modeled; everything else is
//! carried through flattened JSON maps so a read/modify/write cycle
//! preserves the rest of the chain state verbatim. Flattened keys serialize
//! in sorted order, matching the historical script's `sort_keys` emission.

use chrono::{DateTime, Utc};
use columbus_vesting::{Coin, DenomSchedule, Reallocation, VestingError, change_vesting_schedule};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::GenesisError;

/// An exported genesis document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisDocument {
    /// Chain start time, RFC 3339
    pub genesis_time: String,
    /// Chain identifier, e.g. `columbus-1`
    pub chain_id: String,
    /// Application state
    pub app_state: AppState,
    /// Everything else in the document, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `app_state` object of a genesis document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// Genesis accounts
    pub accounts: Vec<Account>,
    /// All other modules' state, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A genesis account record.
///
/// Module accounts carry empty vesting records; those fields are skipped on
/// write rather than emitted as empty arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Bech32 account address
    pub address: String,
    /// Absolute vesting amounts backing ratio 1.0, per denomination
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub original_vesting: Vec<Coin>,
    /// Cliff ledgers, per denomination
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vesting_schedules: Vec<DenomSchedule>,
    /// Remaining account fields (coins, sequence numbers, ...), preserved
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    /// Runs the reallocation engine against this account's schedules.
    pub fn reallocate(
        &mut self,
        request: &Reallocation,
        reference: DateTime<Utc>,
    ) -> Result<(), VestingError> {
        change_vesting_schedule(
            &self.original_vesting,
            &mut self.vesting_schedules,
            request,
            reference,
        )
    }
}

impl GenesisDocument {
    /// Parses a genesis document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, GenesisError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a genesis document from a file.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, GenesisError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Serializes the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, GenesisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes the document as compact JSON.
    pub fn to_json_compact(&self) -> Result<String, GenesisError> {
        Ok(serde_json::to_string(self)?)
    }

    /// The document's `genesis_time` as a UTC instant. This is the reference
    /// date all migration cliffs are computed from.
    pub fn reference_date(&self) -> Result<DateTime<Utc>, GenesisError> {
        DateTime::parse_from_rfc3339(&self.genesis_time)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|source| GenesisError::InvalidGenesisTime {
                value: self.genesis_time.clone(),
                source,
            })
    }
}
