//! The roster store: age groups, ordered crew lists, start numbers and
//! jurors.
//!
//! Persisted as a single JSON document, loaded or defaulted on open and
//! flushed on every mutation. Start numbers are assigned by first-seen
//! order within an age group (1..n), survive renames, and are pruned when
//! a crew is removed.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CrewscoreError, Result};

/// A juror identity. The PIN is roster data; no authentication flow is
/// modeled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Juror {
    pub name: String,
    pub pin: String,
}

/// The persisted roster document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    /// Age groups, in display order
    #[serde(default)]
    pub age_groups: Vec<String>,

    /// Ordered crew list per age group; list order drives start-number
    /// assignment
    #[serde(default)]
    pub crews_by_age: BTreeMap<String, Vec<String>>,

    /// Start numbers per age group (crew -> number)
    #[serde(default)]
    pub start_numbers: BTreeMap<String, BTreeMap<String, u32>>,

    /// Jurors, unique by case-insensitive name
    #[serde(default)]
    pub jurors: Vec<Juror>,
}

/// Handle to the JSON-backed roster store
#[derive(Debug)]
pub struct RosterStore {
    path: PathBuf,
    data: Roster,
}

impl RosterStore {
    /// Open the roster at `path`, starting from an empty roster when the
    /// file is missing or unreadable (logged, never fatal)
    pub fn open(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "roster unparsable, starting empty");
                    Roster::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Roster::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "roster unreadable, starting empty");
                Roster::default()
            }
        };

        let mut store = RosterStore {
            path: path.to_path_buf(),
            data,
        };
        store.ensure_start_numbers();
        store
    }

    /// The roster file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current roster document
    pub fn data(&self) -> &Roster {
        &self.data
    }

    /// Flush the roster to disk
    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    // ----- age groups & crews -----

    /// Age groups in display order
    pub fn age_groups(&self) -> &[String] {
        &self.data.age_groups
    }

    /// True when `name` is a known age group
    pub fn has_age_group(&self, name: &str) -> bool {
        self.data.age_groups.iter().any(|g| g == name)
    }

    /// Ordered crews for an age group (empty for unknown groups)
    pub fn crews(&self, age_group: &str) -> &[String] {
        self.data
            .crews_by_age
            .get(age_group)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replace the age-group list. New groups start with an empty crew
    /// list; crews and start numbers of removed groups are dropped.
    pub fn set_age_groups(&mut self, groups: Vec<String>) -> Result<()> {
        let groups: Vec<String> = groups
            .into_iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();

        for g in &groups {
            self.data.crews_by_age.entry(g.clone()).or_default();
        }
        self.data
            .crews_by_age
            .retain(|g, _| groups.iter().any(|kept| kept == g));
        self.data.age_groups = groups;

        self.ensure_start_numbers();
        self.save()
    }

    /// Add a crew to an age group, assigning the next start number.
    ///
    /// A crew name already present under a *different* age group is
    /// rejected: allowing it would make the crew -> age-group mapping
    /// ambiguous and break start-number resolution downstream. Adding a
    /// name already present in the same group is a no-op.
    pub fn add_crew(&mut self, age_group: &str, crew: &str) -> Result<()> {
        let crew = crew.trim();
        if crew.is_empty() {
            return Err(CrewscoreError::UsageError("crew name is empty".to_string()));
        }
        if !self.has_age_group(age_group) {
            return Err(CrewscoreError::UnknownAgeGroup(age_group.to_string()));
        }

        for (group, crews) in &self.data.crews_by_age {
            if group != age_group && crews.iter().any(|c| c == crew) {
                return Err(CrewscoreError::DuplicateCrew {
                    crew: crew.to_string(),
                    age_group: group.clone(),
                });
            }
        }

        let crews = self.data.crews_by_age.entry(age_group.to_string()).or_default();
        if !crews.iter().any(|c| c == crew) {
            crews.push(crew.to_string());
            self.ensure_start_numbers();
        }
        self.save()
    }

    /// Remove a crew, pruning its start number
    pub fn remove_crew(&mut self, age_group: &str, crew: &str) -> Result<()> {
        if let Some(crews) = self.data.crews_by_age.get_mut(age_group) {
            crews.retain(|c| c != crew);
        }
        self.ensure_start_numbers();
        self.save()
    }

    /// Rename a crew, keeping its start number.
    ///
    /// No-op when the old name is absent or the new name already taken in
    /// the group; renaming onto a name in a different group is rejected
    /// like [`RosterStore::add_crew`].
    pub fn rename_crew(&mut self, age_group: &str, old: &str, new: &str) -> Result<()> {
        let new = new.trim();
        if new.is_empty() || old == new {
            return Ok(());
        }

        for (group, crews) in &self.data.crews_by_age {
            if group != age_group && crews.iter().any(|c| c == new) {
                return Err(CrewscoreError::DuplicateCrew {
                    crew: new.to_string(),
                    age_group: group.clone(),
                });
            }
        }

        let Some(crews) = self.data.crews_by_age.get_mut(age_group) else {
            return Ok(());
        };
        if crews.iter().any(|c| c == new) {
            return Ok(());
        }
        let Some(idx) = crews.iter().position(|c| c == old) else {
            return Ok(());
        };
        crews[idx] = new.to_string();

        // Carry the start number over to the new name
        let numbers = self
            .data
            .start_numbers
            .entry(age_group.to_string())
            .or_default();
        let number = numbers.remove(old).unwrap_or(idx as u32 + 1);
        numbers.insert(new.to_string(), number);

        self.save()
    }

    /// Start number for a crew within its age group
    pub fn start_no(&self, age_group: &str, crew: &str) -> Option<u32> {
        self.data.start_numbers.get(age_group)?.get(crew).copied()
    }

    /// Assign missing start numbers in crew-list order (1..n) and prune
    /// entries for crews no longer present
    pub fn ensure_start_numbers(&mut self) {
        for group in &self.data.age_groups {
            let crews = self
                .data
                .crews_by_age
                .get(group)
                .cloned()
                .unwrap_or_default();
            let numbers = self.data.start_numbers.entry(group.clone()).or_default();

            for (i, crew) in crews.iter().enumerate() {
                numbers.entry(crew.clone()).or_insert(i as u32 + 1);
            }
            numbers.retain(|crew, _| crews.iter().any(|c| c == crew));
        }
        let groups = self.data.age_groups.clone();
        self.data
            .start_numbers
            .retain(|g, _| groups.iter().any(|kept| kept == g));
    }

    // ----- jurors -----

    /// Jurors in registration order
    pub fn jurors(&self) -> &[Juror] {
        &self.data.jurors
    }

    /// True when `name` matches a juror case-insensitively
    pub fn has_juror(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.data
            .jurors
            .iter()
            .any(|j| j.name.to_lowercase() == needle)
    }

    /// Replace the juror list wholesale. Names are trimmed; empty names
    /// and case-insensitive duplicates are rejected.
    pub fn set_jurors(&mut self, jurors: Vec<Juror>) -> Result<()> {
        let mut cleaned: Vec<Juror> = Vec::with_capacity(jurors.len());
        for juror in jurors {
            let name = juror.name.trim().to_string();
            if name.is_empty() {
                return Err(CrewscoreError::UsageError(
                    "juror name is empty".to_string(),
                ));
            }
            if cleaned
                .iter()
                .any(|j| j.name.to_lowercase() == name.to_lowercase())
            {
                return Err(CrewscoreError::DuplicateJuror(name));
            }
            cleaned.push(Juror {
                name,
                pin: juror.pin.trim().to_string(),
            });
        }
        self.data.jurors = cleaned;
        self.save()
    }

    /// Add a juror; names are trimmed and unique case-insensitively
    pub fn add_juror(&mut self, name: &str, pin: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CrewscoreError::UsageError(
                "juror name is empty".to_string(),
            ));
        }
        if self.has_juror(name) {
            return Err(CrewscoreError::DuplicateJuror(name.to_string()));
        }

        self.data.jurors.push(Juror {
            name: name.to_string(),
            pin: pin.trim().to_string(),
        });
        self.save()
    }

    /// Rename a juror, keeping the PIN
    pub fn rename_juror(&mut self, old: &str, new: &str) -> Result<()> {
        let new = new.trim();
        if new.is_empty() {
            return Err(CrewscoreError::UsageError(
                "juror name is empty".to_string(),
            ));
        }
        if !self.has_juror(old) {
            return Err(CrewscoreError::UnknownJuror(old.to_string()));
        }
        if old.to_lowercase() != new.to_lowercase() && self.has_juror(new) {
            return Err(CrewscoreError::DuplicateJuror(new.to_string()));
        }

        for juror in &mut self.data.jurors {
            if juror.name == old {
                juror.name = new.to_string();
            }
        }
        self.save()
    }

    /// Remove a juror by name
    pub fn remove_juror(&mut self, name: &str) -> Result<()> {
        if !self.has_juror(name) {
            return Err(CrewscoreError::UnknownJuror(name.to_string()));
        }
        self.data.jurors.retain(|j| j.name != name);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open(dir: &Path) -> RosterStore {
        RosterStore::open(&dir.join("roster.json"))
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let roster = open(dir.path());
        assert!(roster.age_groups().is_empty());
        assert!(roster.jurors().is_empty());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.json");
        fs::write(&path, "{not json").unwrap();

        let roster = RosterStore::open(&path);
        assert!(roster.age_groups().is_empty());
    }

    #[test]
    fn test_add_crew_assigns_start_numbers_in_order() {
        let dir = tempdir().unwrap();
        let mut roster = open(dir.path());
        roster.set_age_groups(vec!["Juniors".into()]).unwrap();
        roster.add_crew("Juniors", "Aces").unwrap();
        roster.add_crew("Juniors", "Bees").unwrap();
        roster.add_crew("Juniors", "Cats").unwrap();

        assert_eq!(roster.start_no("Juniors", "Aces"), Some(1));
        assert_eq!(roster.start_no("Juniors", "Bees"), Some(2));
        assert_eq!(roster.start_no("Juniors", "Cats"), Some(3));
    }

    #[test]
    fn test_add_crew_same_group_twice_is_noop() {
        let dir = tempdir().unwrap();
        let mut roster = open(dir.path());
        roster.set_age_groups(vec!["Juniors".into()]).unwrap();
        roster.add_crew("Juniors", "Aces").unwrap();
        roster.add_crew("Juniors", "Aces").unwrap();
        assert_eq!(roster.crews("Juniors"), ["Aces".to_string()]);
    }

    #[test]
    fn test_add_crew_rejects_cross_group_duplicate() {
        let dir = tempdir().unwrap();
        let mut roster = open(dir.path());
        roster
            .set_age_groups(vec!["Juniors".into(), "Seniors".into()])
            .unwrap();
        roster.add_crew("Juniors", "Aces").unwrap();

        let err = roster.add_crew("Seniors", "Aces").unwrap_err();
        match err {
            CrewscoreError::DuplicateCrew { crew, age_group } => {
                assert_eq!(crew, "Aces");
                assert_eq!(age_group, "Juniors");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_add_crew_unknown_group() {
        let dir = tempdir().unwrap();
        let mut roster = open(dir.path());
        assert!(matches!(
            roster.add_crew("Juniors", "Aces"),
            Err(CrewscoreError::UnknownAgeGroup(_))
        ));
    }

    #[test]
    fn test_rename_crew_keeps_start_number() {
        let dir = tempdir().unwrap();
        let mut roster = open(dir.path());
        roster.set_age_groups(vec!["Juniors".into()]).unwrap();
        roster.add_crew("Juniors", "Aces").unwrap();
        roster.add_crew("Juniors", "Bees").unwrap();

        roster.rename_crew("Juniors", "Bees", "Breakers").unwrap();
        assert_eq!(roster.crews("Juniors"), ["Aces".to_string(), "Breakers".to_string()]);
        assert_eq!(roster.start_no("Juniors", "Breakers"), Some(2));
        assert_eq!(roster.start_no("Juniors", "Bees"), None);
    }

    #[test]
    fn test_remove_crew_prunes_start_number() {
        let dir = tempdir().unwrap();
        let mut roster = open(dir.path());
        roster.set_age_groups(vec!["Juniors".into()]).unwrap();
        roster.add_crew("Juniors", "Aces").unwrap();
        roster.add_crew("Juniors", "Bees").unwrap();

        roster.remove_crew("Juniors", "Aces").unwrap();
        assert_eq!(roster.start_no("Juniors", "Aces"), None);
        // Remaining crew keeps its original number
        assert_eq!(roster.start_no("Juniors", "Bees"), Some(2));
    }

    #[test]
    fn test_set_age_groups_drops_removed_group_data() {
        let dir = tempdir().unwrap();
        let mut roster = open(dir.path());
        roster
            .set_age_groups(vec!["Juniors".into(), "Seniors".into()])
            .unwrap();
        roster.add_crew("Seniors", "Aces").unwrap();

        roster.set_age_groups(vec!["Juniors".into()]).unwrap();
        assert!(roster.crews("Seniors").is_empty());
        assert_eq!(roster.start_no("Seniors", "Aces"), None);
    }

    #[test]
    fn test_set_jurors_replaces_list() {
        let dir = tempdir().unwrap();
        let mut roster = open(dir.path());
        roster.add_juror("Old", "0000").unwrap();

        roster
            .set_jurors(vec![
                Juror {
                    name: " Kim ".into(),
                    pin: "1234".into(),
                },
                Juror {
                    name: "Lee".into(),
                    pin: "5678".into(),
                },
            ])
            .unwrap();

        let names: Vec<&str> = roster.jurors().iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, ["Kim", "Lee"]);
    }

    #[test]
    fn test_set_jurors_rejects_duplicates() {
        let dir = tempdir().unwrap();
        let mut roster = open(dir.path());
        assert!(matches!(
            roster.set_jurors(vec![
                Juror {
                    name: "Kim".into(),
                    pin: "1".into()
                },
                Juror {
                    name: "kim".into(),
                    pin: "2".into()
                },
            ]),
            Err(CrewscoreError::DuplicateJuror(_))
        ));
    }

    #[test]
    fn test_jurors_case_insensitive_unique() {
        let dir = tempdir().unwrap();
        let mut roster = open(dir.path());
        roster.add_juror("Kim", "1234").unwrap();

        assert!(matches!(
            roster.add_juror("kim", "9999"),
            Err(CrewscoreError::DuplicateJuror(_))
        ));
        assert_eq!(roster.jurors().len(), 1);
    }

    #[test]
    fn test_rename_juror_keeps_pin() {
        let dir = tempdir().unwrap();
        let mut roster = open(dir.path());
        roster.add_juror("Kim", "1234").unwrap();
        roster.rename_juror("Kim", "Kimberly").unwrap();

        assert_eq!(roster.jurors()[0].name, "Kimberly");
        assert_eq!(roster.jurors()[0].pin, "1234");
    }

    #[test]
    fn test_remove_juror() {
        let dir = tempdir().unwrap();
        let mut roster = open(dir.path());
        roster.add_juror("Kim", "1234").unwrap();
        roster.remove_juror("Kim").unwrap();
        assert!(roster.jurors().is_empty());

        assert!(matches!(
            roster.remove_juror("Kim"),
            Err(CrewscoreError::UnknownJuror(_))
        ));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut roster = open(dir.path());
            roster.set_age_groups(vec!["Juniors".into()]).unwrap();
            roster.add_crew("Juniors", "Aces").unwrap();
            roster.add_juror("Kim", "1234").unwrap();
        }

        let roster = open(dir.path());
        assert_eq!(roster.age_groups(), ["Juniors".to_string()]);
        assert_eq!(roster.crews("Juniors"), ["Aces".to_string()]);
        assert_eq!(roster.start_no("Juniors", "Aces"), Some(1));
        assert_eq!(roster.jurors()[0].name, "Kim");
    }
}
