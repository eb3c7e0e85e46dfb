//! Crewscore Core Library
//!
//! Core domain logic for the crewscore competition scoring system.

pub mod config;
pub mod error;
pub mod format;
pub mod leaderboard;
pub mod ledger;
pub mod logging;
pub mod reconcile;
pub mod roster;
pub mod scoring;
pub mod store;
