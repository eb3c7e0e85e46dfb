//! `crewscore delete` command - remove one record by key
//!
//! After the delete the crew reappears in the judge's unscored list for
//! that round/age-group. No match is "nothing to do", not a failure.

use crate::cli::Cli;
use crewscore_core::error::Result;
use crewscore_core::format::OutputFormat;
use crewscore_core::ledger::ScoreKey;
use crewscore_core::scoring::Round;
use crewscore_core::store::Store;

/// Execute the delete command
pub fn execute(
    cli: &Cli,
    store: &Store,
    round: Round,
    age_group: &str,
    crew: &str,
    judge: &str,
) -> Result<()> {
    let key = ScoreKey {
        round,
        age_group: age_group.to_string(),
        crew: crew.to_string(),
        judge: judge.to_string(),
    };
    let removed = store.ledger().delete(&key)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "ok",
                "removed": removed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                if removed > 0 {
                    println!("Removed {} record(s) for {} / {} / {} / judge {}", removed, round, age_group, crew, judge);
                } else {
                    println!("Nothing to do: no record for {} / {} / {} / judge {}", round, age_group, crew, judge);
                }
            }
        }
    }

    Ok(())
}
