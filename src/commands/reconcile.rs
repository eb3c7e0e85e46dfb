//! `crewscore reconcile` command - roster/ledger drift detection
//!
//! Read-only by default: lists records whose denormalized age group
//! disagrees with the roster or whose crew cannot be resolved. Repair is
//! an explicit bulk rewrite behind --repair, never applied on read.

use crate::cli::Cli;
use crewscore_core::error::Result;
use crewscore_core::format::OutputFormat;
use crewscore_core::reconcile::{self, CrewIndex};
use crewscore_core::store::Store;

/// Execute the reconcile command
pub fn execute(cli: &Cli, store: &Store, repair: bool) -> Result<()> {
    let roster = store.roster();
    let ledger = store.ledger();
    let index = CrewIndex::build(&roster);

    let flagged = reconcile::check(&ledger.load_all(), &index);

    let repaired = if repair {
        Some(reconcile::repair(ledger, &index)?)
    } else {
        None
    };

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "flagged": flagged,
                "repaired": repaired,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if flagged.is_empty() {
                if !cli.quiet {
                    println!("Ledger and roster are consistent");
                }
            } else {
                println!("Flagged records:");
                for f in &flagged {
                    let note = if f.resolution.changed {
                        format!("age group '{}' -> '{}'", f.stored_age_group, f.resolution.age_group)
                    } else {
                        "crew not resolvable in roster".to_string()
                    };
                    println!("  {} / judge {} / {}: {}", f.timestamp, f.judge, f.crew, note);
                }
            }
            if let Some(repaired) = repaired {
                println!("Repaired {} record(s)", repaired);
            }
        }
    }

    Ok(())
}
