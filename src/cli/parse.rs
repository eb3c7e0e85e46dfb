//! Value parsers bridging clap arguments to core types

use crewscore_core::format::OutputFormat;
use crewscore_core::scoring::Round;

/// Parse the --format flag
pub fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: crewscore_core::error::CrewscoreError| e.to_string())
}

/// Parse a round token (canonical or legacy)
pub fn parse_round(s: &str) -> Result<Round, String> {
    s.parse().map_err(|e: crewscore_core::error::CrewscoreError| e.to_string())
}
