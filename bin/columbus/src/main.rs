//! Columbus genesis migration binary
//!
//! Offline, one-shot transform of an exported genesis document: applies the
//! vesting-schedule reallocation rows, stamps the new chain id and start
//! time, and emits the migrated document. Any failure aborts before output
//! is written.

#![allow(missing_docs)]

use clap::Parser;
use columbus_genesis::{
    GenesisDocument, MigrateOptions, apply_substitutions, migrate,
    migrate::{DEFAULT_CHAIN_ID, DEFAULT_GENESIS_TIME},
    read_rows,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "columbus-migrate",
    about = "Convert an exported genesis.json from columbus-1 to columbus-2"
)]
struct Cli {
    /// Exported genesis.json file
    exported_genesis: PathBuf,

    /// Headerless CSV of address,denom,amount reallocation rows
    #[arg(long, value_name = "FILE")]
    vesting: Option<PathBuf>,

    /// Chain id stamped into the migrated document
    #[arg(long, default_value = DEFAULT_CHAIN_ID)]
    chain_id: String,

    /// Genesis time stamped into the migrated document
    #[arg(long, default_value = DEFAULT_GENESIS_TIME)]
    genesis_time: String,

    /// Address substitution applied to the emitted document
    #[arg(long = "replace", value_name = "OLD=NEW", value_parser = parse_substitution)]
    replace: Vec<(String, String)>,

    /// Write the migrated document here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn parse_substitution(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(old, new)| (old.to_string(), new.to_string()))
        .ok_or_else(|| format!("expected OLD=NEW, got {s:?}"))
}

fn run(cli: Cli) -> eyre::Result<()> {
    let rows = match &cli.vesting {
        Some(path) => read_rows(path)?,
        None => Vec::new(),
    };
    let mut doc = GenesisDocument::read_file(&cli.exported_genesis)?;

    let options = MigrateOptions {
        chain_id: cli.chain_id,
        genesis_time: cli.genesis_time,
        substitutions: cli.replace,
    };
    let summary = migrate(&mut doc, &rows, &options)?;
    info!(
        target: "columbus::cli",
        reallocations = summary.reallocations,
        unmatched_rows = summary.unmatched_rows,
        chain_id = %doc.chain_id,
        "migration complete"
    );

    let json = if cli.compact { doc.to_json_compact()? } else { doc.to_json_pretty()? };
    let json = apply_substitutions(json, &options.substitutions);

    match &cli.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn main() {
    // logs go to stderr; stdout carries the migrated document
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
