//! `crewscore unscored` command - crews a judge has not yet scored
//!
//! The roster's crew list for the age group, minus the crews the judge
//! already has a record for in that round. Deleting a record makes its
//! crew reappear here.

use crate::cli::Cli;
use crewscore_core::error::{CrewscoreError, Result};
use crewscore_core::format::OutputFormat;
use crewscore_core::scoring::Round;
use crewscore_core::store::Store;

/// Execute the unscored command
pub fn execute(
    cli: &Cli,
    store: &Store,
    judge: &str,
    round: Round,
    age_group: &str,
) -> Result<()> {
    let roster = store.roster();

    if !roster.has_juror(judge) {
        return Err(CrewscoreError::UnknownJuror(judge.to_string()));
    }
    if !roster.has_age_group(age_group) {
        return Err(CrewscoreError::UnknownAgeGroup(age_group.to_string()));
    }

    let scored: Vec<String> = store
        .ledger()
        .slice(round, age_group)
        .into_iter()
        .filter(|r| r.judge == judge)
        .map(|r| r.crew)
        .collect();

    let unscored: Vec<&String> = roster
        .crews(age_group)
        .iter()
        .filter(|crew| !scored.contains(crew))
        .collect();

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "judge": judge,
                "round": round.to_string(),
                "age_group": age_group,
                "unscored": unscored,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if unscored.is_empty() {
                println!("All crews scored ({} / {} / judge {})", round, age_group, judge);
            } else {
                println!("Not yet scored by {} ({} / {}):", judge, round, age_group);
                for crew in unscored {
                    let start = roster
                        .start_no(age_group, crew)
                        .map(|n| format!("{:>3}  ", n))
                        .unwrap_or_else(|| "  ?  ".to_string());
                    println!("{}{}", start, crew);
                }
            }
        }
    }

    Ok(())
}
