//! Category definitions, weighting rules and score validation.
//!
//! Five fixed categories are judged 1-10. The first two (synchronicity and
//! choreography difficulty) are weighted: they count twice toward the
//! per-judge total, so the maximum per-judge total is 70.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CrewscoreError, Result};

/// Number of judged categories
pub const CATEGORY_COUNT: usize = 5;

/// The fixed judged categories, in ledger column order
pub const CATEGORIES: [&str; CATEGORY_COUNT] = [
    "Synchronicity",
    "Choreography Difficulty",
    "Choreography",
    "Pictures and Lines",
    "Expression and Stage Presence",
];

/// The first N categories count double toward the judge total
pub const WEIGHTED_CATEGORY_COUNT: usize = 2;

/// Lowest valid category score
pub const MIN_CATEGORY_SCORE: u8 = 1;

/// Highest valid category score
pub const MAX_CATEGORY_SCORE: u8 = 10;

/// Maximum possible per-judge total (2*10*2 + 3*10)
pub const MAX_JUDGE_TOTAL: u32 = 70;

/// Weight applied to the category at `index`
pub fn category_weight(index: usize) -> u32 {
    if index < WEIGHTED_CATEGORY_COUNT {
        2
    } else {
        1
    }
}

/// Weighted per-judge total over raw category values.
///
/// Operates on raw (possibly coerced-to-0) values so the leaderboard can
/// total rows that never passed submission validation.
pub fn weighted_total(scores: &[u8; CATEGORY_COUNT]) -> u32 {
    scores
        .iter()
        .enumerate()
        .map(|(i, &s)| u32::from(s) * category_weight(i))
        .sum()
}

/// Count of categories scored exactly 10
pub fn tens_count(scores: &[u8; CATEGORY_COUNT]) -> u32 {
    scores
        .iter()
        .filter(|&&s| s == MAX_CATEGORY_SCORE)
        .count() as u32
}

/// Raw (unweighted) sum of the weighted categories
pub fn double_category_sum(scores: &[u8; CATEGORY_COUNT]) -> u32 {
    scores[..WEIGHTED_CATEGORY_COUNT]
        .iter()
        .map(|&s| u32::from(s))
        .sum()
}

/// A complete, validated set of category scores (each 1-10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores([u8; CATEGORY_COUNT]);

impl CategoryScores {
    /// Validate raw values, listing every offending category on failure
    pub fn new(values: [u8; CATEGORY_COUNT]) -> Result<Self> {
        let fields: Vec<String> = values
            .iter()
            .enumerate()
            .filter(|(_, &v)| !(MIN_CATEGORY_SCORE..=MAX_CATEGORY_SCORE).contains(&v))
            .map(|(i, _)| CATEGORIES[i].to_string())
            .collect();

        if fields.is_empty() {
            Ok(CategoryScores(values))
        } else {
            Err(CrewscoreError::InvalidScores { fields })
        }
    }

    /// The raw category values
    pub fn values(&self) -> &[u8; CATEGORY_COUNT] {
        &self.0
    }

    /// Weighted per-judge total for these scores
    pub fn weighted_total(&self) -> u32 {
        weighted_total(&self.0)
    }
}

/// A partially entered submission: per-category values that may be unset.
///
/// The unset state is an explicit `None`, never a sentinel value. Only a
/// fully present draft finalizes into a [`CategoryScores`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftScores([Option<u8>; CATEGORY_COUNT]);

impl DraftScores {
    /// Set the value for the category at `index`
    pub fn set(&mut self, index: usize, value: u8) {
        self.0[index] = Some(value);
    }

    /// Clear the value for the category at `index`
    pub fn clear(&mut self, index: usize) {
        self.0[index] = None;
    }

    /// True when every category has a value
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Validate into a complete score set.
    ///
    /// Unset and out-of-range categories are both reported, so the caller
    /// can surface the full list of offending fields at once.
    pub fn finalize(&self) -> Result<CategoryScores> {
        let mut fields = Vec::new();
        let mut values = [0u8; CATEGORY_COUNT];

        for (i, v) in self.0.iter().enumerate() {
            match v {
                Some(v) if (MIN_CATEGORY_SCORE..=MAX_CATEGORY_SCORE).contains(v) => {
                    values[i] = *v;
                }
                _ => fields.push(CATEGORIES[i].to_string()),
            }
        }

        if fields.is_empty() {
            Ok(CategoryScores(values))
        } else {
            Err(CrewscoreError::InvalidScores { fields })
        }
    }
}

impl From<[Option<u8>; CATEGORY_COUNT]> for DraftScores {
    fn from(values: [Option<u8>; CATEGORY_COUNT]) -> Self {
        DraftScores(values)
    }
}

/// Competition round a score belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Round {
    /// The heat round
    #[serde(rename = "Round 1")]
    Round1,
    /// The intermediate (tie-break) round
    #[serde(rename = "Intermediate")]
    Intermediate,
}

impl Round {
    /// Canonical round token as stored in the ledger
    pub fn as_str(&self) -> &'static str {
        match self {
            Round::Round1 => "Round 1",
            Round::Intermediate => "Intermediate",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Round {
    type Err = CrewscoreError;

    /// Parse a round token.
    ///
    /// Accepts the legacy tokens `1` and `ZW` from old exports; the
    /// canonical tokens are always re-emitted on write.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Round 1" | "round 1" | "round1" | "1" => Ok(Round::Round1),
            "Intermediate" | "intermediate" | "ZW" | "zw" => Ok(Round::Intermediate),
            other => Err(CrewscoreError::UnknownRound(other.to_string())),
        }
    }
}
