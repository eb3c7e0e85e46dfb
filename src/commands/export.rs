//! `crewscore export` command - ledger view as CSV
//!
//! Exports exactly the filtered/sorted view with the live store's column
//! schema, so a later `import` of the file is a no-op. Start numbers may
//! drive the sort order but are not a ledger column.

use std::fs;
use std::path::Path;

use crate::cli::{Cli, SortBy};
use crewscore_core::error::Result;
use crewscore_core::format::OutputFormat;
use crewscore_core::ledger::Ledger;
use crewscore_core::store::Store;

/// Execute the export command
pub fn execute(
    cli: &Cli,
    store: &Store,
    age_group: Option<&str>,
    sort_by: SortBy,
    descending: bool,
    output: Option<&Path>,
) -> Result<()> {
    let roster = store.roster();
    let mut records = store.ledger().load_all();

    if let Some(age_group) = age_group {
        records.retain(|r| r.age_group == age_group);
    }

    // Stable sorts keep ledger order for equal keys
    match sort_by {
        SortBy::StartNumber => records.sort_by_key(|r| {
            // Unknown crews sort last
            roster.start_no(&r.age_group, &r.crew).unwrap_or(u32::MAX)
        }),
        SortBy::Timestamp => records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        SortBy::Total => records.sort_by_key(|r| r.weighted_total),
    }
    if descending {
        records.reverse();
    }

    let csv = Ledger::encode(&records);

    match output {
        Some(path) => {
            fs::write(path, &csv)?;
            match cli.format {
                OutputFormat::Json => {
                    let output = serde_json::json!({
                        "status": "ok",
                        "file": path.display().to_string(),
                        "rows": records.len(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Human => {
                    if !cli.quiet {
                        println!("Exported {} rows to {}", records.len(), path.display());
                    }
                }
            }
        }
        None => {
            // The CSV itself is the output, regardless of --format
            print!("{}", csv);
        }
    }

    Ok(())
}
