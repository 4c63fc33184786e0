use crate::catalog::LoadWarning;
use crate::error::Result;
use crate::oracle::CompletionOracle;
use serde::Deserialize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Marks whether a milestone opens or closes a patch's story arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MilestoneRole {
    Start,
    Final,
}

/// One table-of-contents entry: a checkpoint quest at a patch boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneEntry {
    /// Patch label, e.g. "2.5".
    #[serde(rename = "Patch")]
    pub patch: String,

    /// Expansion abbreviation, e.g. "ARR".
    #[serde(rename = "Expansion")]
    pub expansion: String,

    #[serde(rename = "Role")]
    pub role: MilestoneRole,

    /// Quest name, e.g. "Before the Dawn".
    #[serde(rename = "Name")]
    pub name: String,

    /// Checkpoint quest ids; completing any one reaches the milestone.
    #[serde(rename = "Ids")]
    pub ids: Vec<u32>,
}

/// The ordered milestone table, loaded once from the reserved TOC file.
///
/// Entries are kept in document order, which the source guarantees to be
/// chronological (oldest patch first); resolution relies on that ordering
/// and never re-sorts.
#[derive(Debug, Default)]
pub struct MilestoneTable {
    entries: Vec<MilestoneEntry>,
}

impl MilestoneTable {
    /// Load the TOC document. Missing or malformed files degrade to an
    /// empty table plus a warning, same policy as the catalog loader.
    pub fn load(path: &Path) -> (Self, Vec<LoadWarning>) {
        if !path.is_file() {
            warn!("TOC file not found: {}", path.display());
            let warning = LoadWarning::MissingDataSource {
                path: path.to_path_buf(),
            };
            return (Self::default(), vec![warning]);
        }
        match read_entries(path) {
            Ok(entries) => {
                info!("loaded {} TOC entries from {}", entries.len(), path.display());
                (Self { entries }, Vec::new())
            }
            Err(err) => {
                warn!("failed to load {}: {err}", path.display());
                let warning = LoadWarning::ParseFailure {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                };
                (Self::default(), vec![warning])
            }
        }
    }

    /// Table built from in-memory entries, for hosts and tests.
    pub fn from_entries(entries: Vec<MilestoneEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MilestoneEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Patch label of the newest `Final` milestone the player has reached,
    /// or `None` for a table without `Final` entries or a player who has
    /// completed none of them.
    ///
    /// The scan runs newest-first and returns on the first entry with any
    /// id complete; earlier milestones are deliberately not verified.
    pub fn highest_completed_milestone(&self, oracle: &impl CompletionOracle) -> Option<&str> {
        for entry in self
            .entries
            .iter()
            .rev()
            .filter(|entry| entry.role == MilestoneRole::Final)
        {
            if entry.ids.iter().any(|&id| oracle.is_complete(id)) {
                info!("highest milestone: {} ({})", entry.patch, entry.name);
                return Some(entry.patch.as_str());
            }
        }
        debug!("no milestones completed yet");
        None
    }

    /// The `Start` entry of a patch, if the table has one.
    pub fn start_of_patch(&self, patch: &str) -> Option<&MilestoneEntry> {
        self.entries
            .iter()
            .find(|entry| entry.role == MilestoneRole::Start && entry.patch == patch)
    }
}

fn read_entries(path: &Path) -> Result<Vec<MilestoneEntry>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::Disconnected;
    use crate::oracle::testing::StubOracle;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn entry(patch: &str, role: MilestoneRole, ids: &[u32]) -> MilestoneEntry {
        MilestoneEntry {
            patch: patch.to_string(),
            expansion: "ARR".to_string(),
            role,
            name: format!("Milestone {patch}"),
            ids: ids.to_vec(),
        }
    }

    fn table() -> MilestoneTable {
        MilestoneTable::from_entries(vec![
            entry("2.0", MilestoneRole::Start, &[100]),
            entry("2.0", MilestoneRole::Final, &[101]),
            entry("2.5", MilestoneRole::Final, &[102]),
            entry("3.0", MilestoneRole::Final, &[103, 104]),
        ])
    }

    #[test]
    fn newest_completed_final_wins() {
        let table = table();
        let milestone = table.highest_completed_milestone(&StubOracle::with([101, 102]));
        assert_eq!(milestone, Some("2.5"));
    }

    #[test]
    fn later_milestone_short_circuits_even_without_earlier_ones() {
        // 3.0 is complete while 2.0/2.5 are not; the scan must not look
        // for the lowest complete patch.
        let table = table();
        let milestone = table.highest_completed_milestone(&StubOracle::with([103]));
        assert_eq!(milestone, Some("3.0"));
    }

    #[test]
    fn any_id_in_an_entry_reaches_the_milestone() {
        let table = table();
        let milestone = table.highest_completed_milestone(&StubOracle::with([104]));
        assert_eq!(milestone, Some("3.0"));
    }

    #[test]
    fn start_entries_never_count_as_milestones() {
        let table = table();
        let milestone = table.highest_completed_milestone(&StubOracle::with([100]));
        assert_eq!(milestone, None);
    }

    #[test]
    fn absent_when_nothing_is_complete() {
        let table = table();
        assert_eq!(table.highest_completed_milestone(&Disconnected), None);

        let empty = MilestoneTable::default();
        assert_eq!(empty.highest_completed_milestone(&StubOracle::with([101])), None);
    }

    #[test]
    fn start_of_patch_lookup() {
        let table = table();
        assert_eq!(table.start_of_patch("2.0").unwrap().ids, vec![100]);
        assert_eq!(table.start_of_patch("3.0"), None);
    }

    #[test_log::test]
    fn load_parses_pascal_case_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("toc.json");
        fs::write(
            &path,
            r#"[
                {"Patch": "2.0", "Expansion": "ARR", "Role": "Start", "Name": "Close to Home", "Ids": [65660, 65659, 65661]},
                {"Patch": "2.0", "Expansion": "ARR", "Role": "Final", "Name": "The Ultimate Weapon", "Ids": [66060]}
            ]"#,
        )
        .unwrap();

        let (table, warnings) = MilestoneTable::load(&path);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(table.entries().len(), 2);
        assert_eq!(table.entries()[0].role, MilestoneRole::Start);
        assert_eq!(table.entries()[1].ids, vec![66060]);
    }

    #[test]
    fn missing_file_degrades_to_empty_table() {
        let (table, warnings) = MilestoneTable::load(Path::new("/nonexistent/toc.json"));
        assert!(table.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(matches!(&warnings[0], LoadWarning::MissingDataSource { .. }));
    }

    #[test]
    fn malformed_file_degrades_to_empty_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("toc.json");
        fs::write(&path, "{not an array").unwrap();

        let (table, warnings) = MilestoneTable::load(&path);
        assert!(table.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(matches!(&warnings[0], LoadWarning::ParseFailure { .. }));
    }
}
