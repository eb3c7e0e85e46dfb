//! `crewscore roster` commands - age-group, crew and juror administration
//!
//! Every mutation flushes the roster to disk; start numbers are assigned
//! in list order on first registration and survive renames.

use crate::cli::{Cli, RosterCommands};
use crewscore_core::error::Result;
use crewscore_core::format::OutputFormat;
use crewscore_core::roster::{Juror, RosterStore};
use crewscore_core::store::Store;

/// Execute a roster subcommand
pub fn execute(cli: &Cli, store: &Store, command: &RosterCommands) -> Result<()> {
    let mut roster = store.roster();

    match command {
        RosterCommands::SetAgeGroups { groups } => {
            roster.set_age_groups(groups.clone())?;
            confirm(cli, format!("Age groups set: {}", groups.join(", ")))
        }

        RosterCommands::ListAgeGroups => match cli.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "age_groups": roster.age_groups(),
                    }))?
                );
                Ok(())
            }
            OutputFormat::Human => {
                for group in roster.age_groups() {
                    println!("{}", group);
                }
                Ok(())
            }
        },

        RosterCommands::AddCrew { age_group, crew } => {
            roster.add_crew(age_group, crew)?;
            let start = roster.start_no(age_group, crew.trim());
            confirm(
                cli,
                format!(
                    "Added crew '{}' to {} (start no. {})",
                    crew.trim(),
                    age_group,
                    start.map(|n| n.to_string()).unwrap_or_else(|| "?".into())
                ),
            )
        }

        RosterCommands::RenameCrew {
            age_group,
            old,
            new,
        } => {
            roster.rename_crew(age_group, old, new)?;
            confirm(cli, format!("Renamed crew '{}' to '{}'", old, new.trim()))
        }

        RosterCommands::RemoveCrew { age_group, crew } => {
            roster.remove_crew(age_group, crew)?;
            confirm(cli, format!("Removed crew '{}' from {}", crew, age_group))
        }

        RosterCommands::ListCrews { age_group } => list_crews(cli, &roster, age_group),

        RosterCommands::SetJurors { jurors } => {
            let entries: Vec<Juror> = jurors
                .iter()
                .map(|entry| {
                    let (name, pin) = entry.split_once(':').unwrap_or((entry.as_str(), ""));
                    Juror {
                        name: name.to_string(),
                        pin: pin.to_string(),
                    }
                })
                .collect();
            roster.set_jurors(entries)?;
            let names: Vec<&str> = roster.jurors().iter().map(|j| j.name.as_str()).collect();
            confirm(cli, format!("Jurors set: {}", names.join(", ")))
        }

        RosterCommands::AddJuror { name, pin } => {
            roster.add_juror(name, pin)?;
            confirm(cli, format!("Added juror '{}'", name.trim()))
        }

        RosterCommands::RenameJuror { old, new } => {
            roster.rename_juror(old, new)?;
            confirm(cli, format!("Renamed juror '{}' to '{}'", old, new.trim()))
        }

        RosterCommands::RemoveJuror { name } => {
            roster.remove_juror(name)?;
            confirm(cli, format!("Removed juror '{}'", name))
        }

        RosterCommands::ListJurors => list_jurors(cli, &roster),
    }
}

fn list_jurors(cli: &Cli, roster: &RosterStore) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let jurors: Vec<_> = roster
                .jurors()
                .iter()
                .map(|j| serde_json::json!({ "name": j.name, "pin": j.pin }))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "jurors": jurors }))?
            );
        }
        OutputFormat::Human => {
            for juror in roster.jurors() {
                println!("{}", juror.name);
            }
        }
    }
    Ok(())
}

fn list_crews(cli: &Cli, roster: &RosterStore, age_group: &str) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let crews: Vec<_> = roster
                .crews(age_group)
                .iter()
                .map(|crew| {
                    serde_json::json!({
                        "crew": crew,
                        "start_number": roster.start_no(age_group, crew),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "age_group": age_group,
                    "crews": crews,
                }))?
            );
        }
        OutputFormat::Human => {
            for crew in roster.crews(age_group) {
                let start = roster
                    .start_no(age_group, crew)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "?".into());
                println!("{:>3}  {}", start, crew);
            }
        }
    }
    Ok(())
}

fn confirm(cli: &Cli, message: String) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "status": "ok",
                    "message": message,
                }))?
            );
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("{}", message);
            }
        }
    }
    Ok(())
}
