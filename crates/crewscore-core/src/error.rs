//! Error types and exit codes for crewscore
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/store error (missing store, invalid submission, etc.)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes reported by the crewscore binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error - missing store, invalid submission (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during crewscore operations
#[derive(Error, Debug)]
pub enum CrewscoreError {
    // Usage errors (exit code 2)
    #[error("unknown round: {0} (expected: \"Round 1\" or \"Intermediate\")")]
    UnknownRound(String),

    #[error("{0}")]
    UsageError(String),

    // Data/store errors (exit code 3)
    #[error("store not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    #[error("invalid scores for: {}", fields.join(", "))]
    InvalidScores { fields: Vec<String> },

    #[error("unknown age group: {0}")]
    UnknownAgeGroup(String),

    #[error("unknown juror: {0}")]
    UnknownJuror(String),

    #[error("crew '{crew}' already exists in age group '{age_group}'")]
    DuplicateCrew { crew: String, age_group: String },

    #[error("juror '{0}' already exists")]
    DuplicateJuror(String),

    #[error("import file is missing required column: {0}")]
    MissingColumn(String),

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl CrewscoreError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            // Usage errors
            CrewscoreError::UnknownRound(_) | CrewscoreError::UsageError(_) => ExitCode::Usage,

            // Data/store errors
            CrewscoreError::StoreNotFound { .. }
            | CrewscoreError::InvalidScores { .. }
            | CrewscoreError::UnknownAgeGroup(_)
            | CrewscoreError::UnknownJuror(_)
            | CrewscoreError::DuplicateCrew { .. }
            | CrewscoreError::DuplicateJuror(_)
            | CrewscoreError::MissingColumn(_) => ExitCode::Data,

            // Generic failures
            CrewscoreError::Io(_)
            | CrewscoreError::Json(_)
            | CrewscoreError::Toml(_)
            | CrewscoreError::Other(_) => ExitCode::Failure,
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            CrewscoreError::UnknownRound(_) => "unknown_round",
            CrewscoreError::UsageError(_) => "usage_error",
            CrewscoreError::StoreNotFound { .. } => "store_not_found",
            CrewscoreError::InvalidScores { .. } => "invalid_scores",
            CrewscoreError::UnknownAgeGroup(_) => "unknown_age_group",
            CrewscoreError::UnknownJuror(_) => "unknown_juror",
            CrewscoreError::DuplicateCrew { .. } => "duplicate_crew",
            CrewscoreError::DuplicateJuror(_) => "duplicate_juror",
            CrewscoreError::MissingColumn(_) => "missing_column",
            CrewscoreError::Io(_) => "io_error",
            CrewscoreError::Json(_) => "json_error",
            CrewscoreError::Toml(_) => "toml_error",
            CrewscoreError::Other(_) => "other",
        }
    }
}

/// Result type alias for crewscore operations
pub type Result<T> = std::result::Result<T, CrewscoreError>;
