//! `crewscore import` command - bulk upsert from a CSV file
//!
//! Every row runs through the same upsert-by-key path as a live
//! submission, so re-importing an export is idempotent. Rows failing
//! validation are skipped and counted, never partially applied.

use std::fs;
use std::path::Path;

use crate::cli::Cli;
use crewscore_core::error::Result;
use crewscore_core::format::OutputFormat;
use crewscore_core::store::Store;

/// Execute the import command
pub fn execute(cli: &Cli, store: &Store, file: &Path) -> Result<()> {
    let content = fs::read_to_string(file)?;
    let summary = store.ledger().import_csv(&content)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "ok",
                "imported": summary.imported,
                "skipped": summary.skipped,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Imported {} rows ({} skipped)", summary.imported, summary.skipped);
            }
        }
    }

    Ok(())
}
