//! Store management for crewscore
//!
//! The store is the root directory containing all competition data:
//! `config.toml`, the score ledger (`scores.csv`) and the roster
//! (`roster.json`). Default location: `.crewscore/` (hidden,
//! git-trackable). All reads and writes route through this explicitly
//! constructed handle; there is no ambient global state.

pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::error::{CrewscoreError, Result};
use crate::ledger::Ledger;
use crate::roster::RosterStore;
use paths::{CONFIG_FILE, DEFAULT_STORE_DIR, LEDGER_FILE, ROSTER_FILE};

/// The crewscore store
#[derive(Debug)]
pub struct Store {
    /// Root path of the store
    root: PathBuf,
    /// Store configuration
    config: StoreConfig,
    /// The single ledger handle; its mutex serializes every mutation
    /// made through this store
    ledger: Ledger,
}

impl Store {
    /// Discover a store by walking up from the given root directory
    pub fn discover(root: &Path) -> Result<Self> {
        let store_path = paths::discover_store(root)?;
        Self::open(&store_path)
    }

    /// Open an existing store at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(CrewscoreError::StoreNotFound {
                search_root: path.to_path_buf(),
            });
        }

        let config_path = path.join(CONFIG_FILE);
        let config = if config_path.exists() {
            StoreConfig::load(&config_path)?
        } else {
            // Sensible defaults when the config is missing
            StoreConfig::default()
        };

        Ok(Store {
            root: path.to_path_buf(),
            config,
            ledger: Ledger::new(&path.join(LEDGER_FILE)),
        })
    }

    /// Initialize a new store under the given project root.
    pub fn init(project_root: &Path) -> Result<Self> {
        let store_path = project_root.join(DEFAULT_STORE_DIR);
        Self::init_at(&store_path)
    }

    /// Initialize a store at an explicit store root path. Idempotent:
    /// existing config, ledger and roster are left untouched.
    pub fn init_at(store_root: &Path) -> Result<Self> {
        fs::create_dir_all(store_root)?;

        let config_path = store_root.join(CONFIG_FILE);
        let config = if config_path.exists() {
            StoreConfig::load(&config_path)?
        } else {
            let config = StoreConfig::default();
            config.save(&config_path)?;
            config
        };

        let store = Store {
            root: store_root.to_path_buf(),
            config,
            ledger: Ledger::new(&store_root.join(LEDGER_FILE)),
        };

        store.ledger().init()?;
        if !store.root.join(ROSTER_FILE).exists() {
            store.roster().save()?;
        }

        Ok(store)
    }

    /// Get the store root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the config
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The store's ledger handle. Always the same handle, so every
    /// mutation routed through this store serializes on one mutex.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Handle to the roster store
    pub fn roster(&self) -> RosterStore {
        RosterStore::open(&self.root.join(ROSTER_FILE))
    }
}
