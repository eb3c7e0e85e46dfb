//! `crewscore correct` command - in-place category fix
//!
//! Locates the record by (timestamp, judge) and replaces only the
//! category values and the recomputed total. The upsert key and the
//! timestamp stay untouched. No match is "nothing to do", not a failure.

use crate::cli::Cli;
use crate::commands::score::to_array;
use crewscore_core::error::Result;
use crewscore_core::format::OutputFormat;
use crewscore_core::scoring::CategoryScores;
use crewscore_core::store::Store;

/// Execute the correct command
pub fn execute(
    cli: &Cli,
    store: &Store,
    timestamp: &str,
    judge: &str,
    scores: &[u8],
) -> Result<()> {
    let scores = CategoryScores::new(to_array(scores)?)?;
    let matched = store
        .ledger()
        .correct_categories(timestamp, judge, scores)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "ok",
                "matched": matched,
                "weighted_total": matched.then(|| scores.weighted_total()),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                if matched {
                    println!(
                        "Corrected record of judge {} at {} - new total {}",
                        judge,
                        timestamp,
                        scores.weighted_total()
                    );
                } else {
                    println!("Nothing to do: no record for judge {} at {}", judge, timestamp);
                }
            }
        }
    }

    Ok(())
}
