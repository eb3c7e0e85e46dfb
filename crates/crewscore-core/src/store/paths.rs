use crate::error::{CrewscoreError, Result};
use std::path::{Path, PathBuf};

/// Default store directory name (hidden)
pub const DEFAULT_STORE_DIR: &str = ".crewscore";

/// Configuration filename
pub const CONFIG_FILE: &str = "config.toml";

/// Score ledger filename
pub const LEDGER_FILE: &str = "scores.csv";

/// Roster filename
pub const ROSTER_FILE: &str = "roster.json";

pub fn discover_store(root: &Path) -> Result<PathBuf> {
    let mut current = root.to_path_buf();

    loop {
        let store_path = current.join(DEFAULT_STORE_DIR);
        if store_path.is_dir() {
            return Ok(store_path);
        }

        // Move up to parent directory
        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                // Reached filesystem root
                return Err(CrewscoreError::StoreNotFound {
                    search_root: root.to_path_buf(),
                });
            }
        }
    }
}
