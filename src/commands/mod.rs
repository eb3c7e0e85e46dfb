//! Command implementations for the crewscore CLI

pub mod board;
pub mod correct;
pub mod delete;
pub mod dispatch;
pub mod export;
pub mod import;
pub mod init;
pub mod reconcile;
pub mod roster;
pub mod score;
pub mod unscored;
pub mod wipe;
