//! Command dispatch logic for crewscore

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::{Cli, Commands};
use crate::commands;
use crewscore_core::error::{CrewscoreError, Result};
use crewscore_core::store::Store;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    // Determine the root directory
    let root = cli
        .root
        .clone()
        .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    tracing::debug!(elapsed = ?start.elapsed(), root = %root.display(), "resolve_root");

    match &cli.command {
        None => Err(CrewscoreError::UsageError(
            "no command given (try --help)".to_string(),
        )),

        Some(Commands::Init) => commands::init::execute(cli, &root),

        Some(Commands::Score {
            judge,
            round,
            age_group,
            crew,
            scores,
        }) => {
            let store = open_store(cli, &root)?;
            commands::score::execute(cli, &store, judge, *round, age_group, crew, scores)
        }

        Some(Commands::Unscored {
            judge,
            round,
            age_group,
        }) => {
            let store = open_store(cli, &root)?;
            commands::unscored::execute(cli, &store, judge, *round, age_group)
        }

        Some(Commands::Board {
            round,
            age_group,
            finalists_n,
        }) => {
            let store = open_store(cli, &root)?;
            commands::board::execute(cli, &store, *round, age_group, *finalists_n)
        }

        Some(Commands::Export {
            age_group,
            sort_by,
            descending,
            output,
        }) => {
            let store = open_store(cli, &root)?;
            commands::export::execute(
                cli,
                &store,
                age_group.as_deref(),
                *sort_by,
                *descending,
                output.as_deref(),
            )
        }

        Some(Commands::Import { file }) => {
            let store = open_store(cli, &root)?;
            commands::import::execute(cli, &store, file)
        }

        Some(Commands::Correct {
            timestamp,
            judge,
            scores,
        }) => {
            let store = open_store(cli, &root)?;
            commands::correct::execute(cli, &store, timestamp, judge, scores)
        }

        Some(Commands::Delete {
            round,
            age_group,
            crew,
            judge,
        }) => {
            let store = open_store(cli, &root)?;
            commands::delete::execute(cli, &store, *round, age_group, crew, judge)
        }

        Some(Commands::Wipe { yes, backup }) => {
            let store = open_store(cli, &root)?;
            commands::wipe::execute(cli, &store, *yes, backup.as_deref())
        }

        Some(Commands::Roster { command }) => {
            let store = open_store(cli, &root)?;
            commands::roster::execute(cli, &store, command)
        }

        Some(Commands::Reconcile { repair }) => {
            let store = open_store(cli, &root)?;
            commands::reconcile::execute(cli, &store, *repair)
        }
    }
}

/// Open the store from --store or by walking up from the root directory
fn open_store(cli: &Cli, root: &std::path::Path) -> Result<Store> {
    if let Some(path) = cli.store.as_ref() {
        let resolved = if path.is_absolute() {
            path.clone()
        } else {
            root.join(path)
        };
        Store::open(&resolved)
    } else {
        Store::discover(root)
    }
}
