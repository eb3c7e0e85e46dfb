//! CLI argument parsing for crewscore
//!
//! Uses clap for argument parsing. Global flags: --root, --store,
//! --format, --quiet, --verbose, --log-level, --log-json.

pub mod parse;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crewscore_core::format::OutputFormat;
use crewscore_core::scoring::Round;
use parse::{parse_format, parse_round};

/// Crewscore - dance-crew competition scoring CLI
#[derive(Parser, Debug)]
#[command(name = "crewscore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit store root path
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_parser = parse_format, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new crewscore store
    Init,

    /// Submit (or overwrite) one judge's scores for a crew
    Score {
        /// Judge name (must be a registered juror)
        #[arg(long)]
        judge: String,

        /// Round the performance belongs to
        #[arg(long, value_parser = parse_round)]
        round: Round,

        /// Age group the crew competes in
        #[arg(long)]
        age_group: String,

        /// Crew name
        #[arg(long)]
        crew: String,

        /// The five category scores (1-10), in category order
        #[arg(num_args = 5, value_names = ["SYNC", "DIFFICULTY", "CHOREO", "PICTURES", "EXPRESSION"])]
        scores: Vec<u8>,
    },

    /// Crews a judge has not yet scored for a round and age group
    Unscored {
        #[arg(long)]
        judge: String,

        #[arg(long, value_parser = parse_round)]
        round: Round,

        #[arg(long)]
        age_group: String,
    },

    /// Ranked leaderboard for one round and age group
    Board {
        #[arg(long, value_parser = parse_round)]
        round: Round,

        #[arg(long)]
        age_group: String,

        /// Override the configured number of direct finalists
        #[arg(long)]
        finalists_n: Option<usize>,
    },

    /// Export the ledger (optionally filtered and sorted) as CSV
    Export {
        /// Only rows for this age group
        #[arg(long)]
        age_group: Option<String>,

        /// Sort key
        #[arg(long, value_enum, default_value = "start-number")]
        sort_by: SortBy,

        /// Sort descending instead of ascending
        #[arg(long)]
        descending: bool,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Bulk-import scores from a CSV file (upsert-by-key, idempotent)
    Import {
        /// CSV file to import
        file: PathBuf,
    },

    /// Correct the category values of one record in place
    Correct {
        /// Timestamp of the record to correct
        #[arg(long)]
        timestamp: String,

        /// Judge of the record to correct
        #[arg(long)]
        judge: String,

        /// The five replacement category scores (1-10)
        #[arg(num_args = 5, value_names = ["SYNC", "DIFFICULTY", "CHOREO", "PICTURES", "EXPRESSION"])]
        scores: Vec<u8>,
    },

    /// Delete one record by key
    Delete {
        #[arg(long, value_parser = parse_round)]
        round: Round,

        #[arg(long)]
        age_group: String,

        #[arg(long)]
        crew: String,

        #[arg(long)]
        judge: String,
    },

    /// Destroy all score records (irreversible)
    Wipe {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,

        /// Write a CSV export of the ledger before wiping
        #[arg(long)]
        backup: Option<PathBuf>,
    },

    /// Manage age groups, crews and jurors
    Roster {
        #[command(subcommand)]
        command: RosterCommands,
    },

    /// Detect (and optionally repair) ledger rows whose age group
    /// disagrees with the roster
    Reconcile {
        /// Rewrite stale rows to the roster's authoritative age group
        #[arg(long)]
        repair: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum RosterCommands {
    /// Replace the age-group list
    SetAgeGroups {
        /// Age group names, in display order
        #[arg(required = true)]
        groups: Vec<String>,
    },

    /// List age groups
    ListAgeGroups,

    /// Add a crew to an age group
    AddCrew {
        #[arg(long)]
        age_group: String,
        crew: String,
    },

    /// Rename a crew (start number is kept)
    RenameCrew {
        #[arg(long)]
        age_group: String,
        old: String,
        new: String,
    },

    /// Remove a crew (its start number is pruned)
    RemoveCrew {
        #[arg(long)]
        age_group: String,
        crew: String,
    },

    /// List crews and start numbers for an age group
    ListCrews { age_group: String },

    /// Replace the juror list
    SetJurors {
        /// Juror entries as NAME:PIN
        #[arg(required = true, value_name = "NAME:PIN")]
        jurors: Vec<String>,
    },

    /// Add a juror
    AddJuror { name: String, pin: String },

    /// Rename a juror (PIN is kept)
    RenameJuror { old: String, new: String },

    /// Remove a juror
    RemoveJuror { name: String },

    /// List jurors
    ListJurors,
}

/// Sort key for ledger exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortBy {
    /// Roster start number (unknown crews sort last)
    StartNumber,
    /// Submission timestamp
    Timestamp,
    /// Weighted total
    Total,
}
