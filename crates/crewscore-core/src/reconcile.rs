//! Reconciliation between the score ledger's denormalized age groups and
//! the roster's authoritative crew -> age-group mapping.
//!
//! Drift appears when a crew is moved between age groups after scores
//! were recorded under the old group. Detection is cheap and read-only;
//! repair is a deliberate bulk rewrite, never applied silently on read.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::Result;
use crate::ledger::{Ledger, ScoreRecord};
use crate::roster::RosterStore;
use crate::scoring::weighted_total;

/// Authoritative crew lookup built from the roster.
///
/// A crew name appearing under more than one age group (possible only in
/// a hand-edited roster file; the roster API rejects it) is marked
/// ambiguous and never resolved.
#[derive(Debug)]
pub struct CrewIndex {
    entries: HashMap<String, Entry>,
}

#[derive(Debug)]
enum Entry {
    Unique { age_group: String, start_number: u32 },
    Ambiguous,
}

/// Outcome of resolving one record's crew against the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The age group the record should carry
    pub age_group: String,
    /// Start number, when the crew resolved uniquely
    pub start_number: Option<u32>,
    /// True when the stored age group disagreed with the roster
    pub changed: bool,
}

/// One ledger record flagged as needing repair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flagged {
    pub timestamp: String,
    pub judge: String,
    pub crew: String,
    pub stored_age_group: String,
    pub resolution: Resolution,
}

impl CrewIndex {
    /// Build the index from the roster's crew lists
    pub fn build(roster: &RosterStore) -> Self {
        let mut entries: HashMap<String, Entry> = HashMap::new();

        for group in roster.age_groups() {
            for crew in roster.crews(group) {
                match entries.get(crew) {
                    None => {
                        entries.insert(
                            crew.clone(),
                            Entry::Unique {
                                age_group: group.clone(),
                                start_number: roster.start_no(group, crew).unwrap_or(0),
                            },
                        );
                    }
                    Some(Entry::Unique { age_group, .. }) if age_group != group => {
                        tracing::warn!(crew = %crew, "crew appears in multiple age groups, marking ambiguous");
                        entries.insert(crew.clone(), Entry::Ambiguous);
                    }
                    Some(_) => {}
                }
            }
        }

        CrewIndex { entries }
    }

    /// Resolve a record's (stored age group, crew) pair.
    ///
    /// - Known, unique crew: the authoritative age group wins; `changed`
    ///   is set when it differs from the stored one (or the stored one is
    ///   empty).
    /// - Ambiguous crew: the stored age group passes through with no
    ///   start number, rather than guessing.
    /// - Unknown crew: the stored age group passes through with no start
    ///   number.
    pub fn derive(&self, age_group_in: &str, crew: &str) -> Resolution {
        match self.entries.get(crew) {
            Some(Entry::Unique {
                age_group,
                start_number,
            }) => Resolution {
                changed: age_group != age_group_in,
                age_group: age_group.clone(),
                start_number: Some(*start_number),
            },
            Some(Entry::Ambiguous) | None => Resolution {
                age_group: age_group_in.to_string(),
                start_number: None,
                changed: false,
            },
        }
    }
}

/// Records whose stored age group or crew mapping needs attention.
///
/// Flags records with `changed = true` (stale age group) or without a
/// resolvable start number (unknown or ambiguous crew).
pub fn check(records: &[ScoreRecord], index: &CrewIndex) -> Vec<Flagged> {
    records
        .iter()
        .filter_map(|record| {
            let resolution = index.derive(&record.age_group, &record.crew);
            if resolution.changed || resolution.start_number.is_none() {
                Some(Flagged {
                    timestamp: record.timestamp.clone(),
                    judge: record.judge.clone(),
                    crew: record.crew.clone(),
                    stored_age_group: record.age_group.clone(),
                    resolution,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Rewrite every stale record's age group to the roster's authoritative
/// value and recompute its weighted total, persisting via a full ledger
/// rewrite. Returns the number of records repaired.
pub fn repair(ledger: &Ledger, index: &CrewIndex) -> Result<usize> {
    let mut records = ledger.load_all();
    let mut repaired = 0;

    for record in &mut records {
        let resolution = index.derive(&record.age_group, &record.crew);
        if resolution.changed {
            record.age_group = resolution.age_group;
            record.weighted_total = weighted_total(&record.scores);
            repaired += 1;
        }
    }

    if repaired > 0 {
        ledger.rewrite(&records)?;
    }
    Ok(repaired)
}
