//! `crewscore init` command - create a new store
//!
//! Idempotent: existing config, ledger and roster are left untouched.

use std::path::Path;

use crate::cli::Cli;
use crewscore_core::error::Result;
use crewscore_core::format::OutputFormat;
use crewscore_core::store::Store;

/// Execute the init command
pub fn execute(cli: &Cli, root: &Path) -> Result<()> {
    let store = if let Some(path) = cli.store.as_ref() {
        let resolved = if path.is_absolute() {
            path.clone()
        } else {
            root.join(path)
        };
        Store::init_at(&resolved)?
    } else {
        Store::init(root)?
    };

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "ok",
                "store": store.root().display().to_string(),
                "message": "Store initialized"
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Initialized crewscore store at {}", store.root().display());
            }
        }
    }

    Ok(())
}
