//! Migration driver
//!
//! Applies reallocation rows to a genesis document, stamps the new chain id
//! and genesis time, and reports what was done. Cliff dates are computed
//! from the document's *current* `genesis_time`, so it is resolved before
//! the new start time is stamped.

use tracing::{info, warn};

use crate::{GenesisDocument, GenesisError, rows::VestingRow};

/// Chain id of the upgraded network.
pub const DEFAULT_CHAIN_ID: &str = "columbus-2";
/// Start time of the upgraded network.
pub const DEFAULT_GENESIS_TIME: &str = "2019-05-20T05:00:00Z";

/// Driver configuration.
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// Chain id to stamp into the migrated document
    pub chain_id: String,
    /// Genesis time to stamp into the migrated document
    pub genesis_time: String,
    /// `old -> new` address substitutions, applied textually at emission
    pub substitutions: Vec<(String, String)>,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            genesis_time: DEFAULT_GENESIS_TIME.to_string(),
            substitutions: Vec::new(),
        }
    }
}

/// What a migration run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MigrateSummary {
    /// Reallocations applied to accounts
    pub reallocations: usize,
    /// Rows that matched no account in the document
    pub unmatched_rows: usize,
}

/// Applies every matching `(account, row)` pair through the reallocation
/// engine, then stamps the new chain id and genesis time.
///
/// Fatal on the first engine error; the document must not be emitted after
/// a failure.
pub fn migrate(
    doc: &mut GenesisDocument,
    rows: &[VestingRow],
    options: &MigrateOptions,
) -> Result<MigrateSummary, GenesisError> {
    if options.chain_id.trim().is_empty() {
        return Err(GenesisError::EmptyChainId);
    }
    let reference = doc.reference_date()?;

    let mut summary = MigrateSummary::default();
    let mut matched = vec![false; rows.len()];

    for account in &mut doc.app_state.accounts {
        for (row, row_matched) in rows.iter().zip(matched.iter_mut()) {
            if account.address == row.address {
                account.reallocate(&row.request(), reference).map_err(|source| {
                    GenesisError::Vesting { address: account.address.clone(), source }
                })?;
                *row_matched = true;
                summary.reallocations += 1;
                info!(
                    target: "columbus::migrate",
                    address = %account.address,
                    denom = %row.denom,
                    amount = row.amount,
                    "reallocated vesting schedule"
                );
            }
        }
    }

    for (row, row_matched) in rows.iter().zip(&matched) {
        if !row_matched {
            summary.unmatched_rows += 1;
            warn!(
                target: "columbus::migrate",
                address = %row.address,
                "reallocation row matched no account"
            );
        }
    }

    doc.chain_id = options.chain_id.trim().to_string();
    doc.genesis_time = options.genesis_time.clone();
    Ok(summary)
}

/// Replaces addresses in serialized output, last step before the document
/// leaves the tool. Plain text replacement, exactly like the historical
/// scripts.
pub fn apply_substitutions(json: String, substitutions: &[(String, String)]) -> String {
    substitutions.iter().fold(json, |text, (old, new)| text.replace(old, new))
}
