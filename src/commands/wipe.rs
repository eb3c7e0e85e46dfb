//! `crewscore wipe` command - destroy all score records
//!
//! Irreversible, so it refuses to run without --yes and offers --backup
//! to write a full export first.

use std::fs;
use std::path::Path;

use crate::cli::Cli;
use crewscore_core::error::{CrewscoreError, Result};
use crewscore_core::format::OutputFormat;
use crewscore_core::ledger::Ledger;
use crewscore_core::store::Store;

/// Execute the wipe command
pub fn execute(cli: &Cli, store: &Store, yes: bool, backup: Option<&Path>) -> Result<()> {
    if !yes {
        return Err(CrewscoreError::UsageError(
            "refusing to wipe the ledger without --yes (use --backup to export first)".to_string(),
        ));
    }

    let ledger = store.ledger();
    let records = ledger.load_all();

    if let Some(path) = backup {
        fs::write(path, Ledger::encode(&records))?;
    }

    ledger.wipe()?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "ok",
                "wiped": records.len(),
                "backup": backup.map(|p| p.display().to_string()),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                if let Some(path) = backup {
                    println!("Backed up {} records to {}", records.len(), path.display());
                }
                println!("Wiped {} records", records.len());
            }
        }
    }

    Ok(())
}
