//! `crewscore score` command - submit or overwrite one judge's scores
//!
//! The upsert path: at most one record exists per (round, age_group,
//! crew, judge) afterwards. Resubmitting replaces all fields including
//! the timestamp.

use crate::cli::Cli;
use crewscore_core::error::{CrewscoreError, Result};
use crewscore_core::format::OutputFormat;
use crewscore_core::ledger::{ScoreKey, UpsertOutcome};
use crewscore_core::scoring::{CategoryScores, Round, CATEGORY_COUNT};
use crewscore_core::store::Store;

/// Execute the score command
pub fn execute(
    cli: &Cli,
    store: &Store,
    judge: &str,
    round: Round,
    age_group: &str,
    crew: &str,
    scores: &[u8],
) -> Result<()> {
    let roster = store.roster();

    if !roster.has_juror(judge) {
        return Err(CrewscoreError::UnknownJuror(judge.to_string()));
    }
    if !roster.has_age_group(age_group) {
        return Err(CrewscoreError::UnknownAgeGroup(age_group.to_string()));
    }
    // An unknown crew is a data-quality warning, not an error: the record
    // is kept and flagged by `reconcile` instead of blocking the scorer.
    if !roster.crews(age_group).iter().any(|c| c == crew) {
        tracing::warn!(crew = crew, age_group = age_group, "crew not in roster, record will need reconciliation");
    }

    let scores = CategoryScores::new(to_array(scores)?)?;

    let key = ScoreKey {
        round,
        age_group: age_group.to_string(),
        crew: crew.to_string(),
        judge: judge.to_string(),
    };
    let outcome = store.ledger().upsert(key, scores)?;

    let start_no = roster.start_no(age_group, crew);
    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "ok",
                "action": match outcome {
                    UpsertOutcome::Created => "created",
                    UpsertOutcome::Updated => "updated",
                },
                "crew": crew,
                "start_number": start_no,
                "age_group": age_group,
                "round": round.to_string(),
                "judge": judge,
                "weighted_total": scores.weighted_total(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                let start = start_no
                    .map(|n| format!(" (start no. {})", n))
                    .unwrap_or_default();
                let action = match outcome {
                    UpsertOutcome::Created => "Saved",
                    UpsertOutcome::Updated => "Updated",
                };
                println!(
                    "{}: {}{}, {}, {}, judge {} - total {}",
                    action,
                    crew,
                    start,
                    age_group,
                    round,
                    judge,
                    scores.weighted_total()
                );
            }
        }
    }

    Ok(())
}

/// Clap guarantees five values; guard anyway so the error is ours
pub fn to_array(scores: &[u8]) -> Result<[u8; CATEGORY_COUNT]> {
    scores.try_into().map_err(|_| {
        CrewscoreError::UsageError(format!(
            "expected {} category scores, got {}",
            CATEGORY_COUNT,
            scores.len()
        ))
    })
}
