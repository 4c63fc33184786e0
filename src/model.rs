use crate::oracle::CompletionOracle;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// A quest as it appears on the wire inside a collection document.
///
/// Field names follow the document format: per-quest keys are PascalCase,
/// unlike the lowercase keys of the enclosing [`CollectionDoc`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuest {
    #[serde(rename = "Title", default)]
    pub title: String,

    /// Quest ids. Several ids mean equivalent variants of the same quest
    /// (one per starting city); completing any one completes the record.
    #[serde(rename = "Id", default)]
    pub ids: Vec<u32>,

    /// Geographic area, may be empty.
    #[serde(rename = "Area", default)]
    pub area: String,

    /// Required starting city; empty applies to every starting city.
    #[serde(rename = "Start", default)]
    pub start: String,

    /// Required grand company; empty applies regardless of company.
    #[serde(rename = "Gc", default)]
    pub gc: String,

    /// Level requirement, informational only.
    #[serde(rename = "Level", default)]
    pub level: i32,
}

/// One quest collection file: a drawer's worth of quests for a patch.
/// Parsed, absorbed into the catalog, and dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionDoc {
    #[serde(default)]
    pub expansion: String,

    /// Drawer identifier (e.g. "1-msq", "2-NewEra").
    #[serde(default)]
    pub drawer: String,

    /// Human-readable title of the collection.
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub quests: Vec<RawQuest>,
}

/// Where a record came from: the enclosing document plus the file's
/// location under the data root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Provenance {
    pub expansion: String,
    /// Parent directory of the source file, relative to the data root,
    /// `/`-separated (e.g. "2.x/2.0"). Used as a human-readable patch label.
    pub patch: String,
    pub drawer: String,
}

/// A quest enriched with provenance. Built once by the catalog loader;
/// the catalog never mutates records after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestRecord {
    pub title: String,
    pub ids: Vec<u32>,
    pub area: String,
    pub start: String,
    pub gc: String,
    pub level: i32,
    pub expansion: String,
    pub patch: String,
    pub drawer: String,
}

impl QuestRecord {
    /// Stamp provenance onto a parsed record. This is the only place
    /// provenance fields are set.
    pub fn from_raw(raw: RawQuest, provenance: &Provenance) -> Self {
        Self {
            title: raw.title,
            ids: raw.ids,
            area: raw.area,
            start: raw.start,
            gc: raw.gc,
            level: raw.level,
            expansion: provenance.expansion.clone(),
            patch: provenance.patch.clone(),
            drawer: provenance.drawer.clone(),
        }
    }

    /// First id in the list, or 0 for the degenerate empty case (loaded
    /// records always have at least one id).
    pub fn primary_id(&self) -> u32 {
        self.ids.first().copied().unwrap_or(0)
    }

    /// Whether any of the record's variant ids tests complete.
    pub fn is_complete(&self, oracle: &impl CompletionOracle) -> bool {
        self.ids.iter().any(|&id| oracle.is_complete(id))
    }
}

impl fmt::Display for QuestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Lv{}, {}, ID: ", self.title, self.level, self.area)?;
        if self.ids.len() > 1 {
            write!(f, "[")?;
            for (i, id) in self.ids.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{id}")?;
            }
            write!(f, "]")?;
        } else {
            write!(f, "{}", self.primary_id())?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::testing::StubOracle;
    use pretty_assertions::assert_eq;

    fn provenance() -> Provenance {
        Provenance {
            expansion: "ARR".to_string(),
            patch: "2.x/2.0".to_string(),
            drawer: "1-msq".to_string(),
        }
    }

    #[test]
    fn raw_quest_parses_pascal_case_keys() {
        let raw: RawQuest = serde_json::from_str(
            r#"{"Title": "Close to Home", "Id": [65660, 65621], "Area": "New Gridania", "Start": "Gridania", "Level": 1}"#,
        )
        .unwrap();
        assert_eq!(raw.title, "Close to Home");
        assert_eq!(raw.ids, vec![65660, 65621]);
        assert_eq!(raw.start, "Gridania");
        assert_eq!(raw.gc, "");
    }

    #[test]
    fn sparse_record_parses_with_defaults() {
        let raw: RawQuest = serde_json::from_str(r#"{"Title": "The Gridanian Envoy"}"#).unwrap();
        assert_eq!(raw.ids, Vec::<u32>::new());
        assert_eq!(raw.level, 0);
    }

    #[test]
    fn provenance_is_stamped_from_the_enclosing_document() {
        let raw: RawQuest = serde_json::from_str(r#"{"Title": "On to Bentbranch", "Id": [65711]}"#).unwrap();
        let record = QuestRecord::from_raw(raw, &provenance());
        assert_eq!(record.expansion, "ARR");
        assert_eq!(record.patch, "2.x/2.0");
        assert_eq!(record.drawer, "1-msq");
        assert_eq!(record.primary_id(), 65711);
    }

    #[test]
    fn primary_id_is_zero_when_ids_are_empty() {
        let record = QuestRecord::from_raw(RawQuest::default(), &provenance());
        assert_eq!(record.primary_id(), 0);
    }

    #[test]
    fn completion_uses_or_semantics_across_variant_ids() {
        let raw = RawQuest {
            ids: vec![10, 20],
            ..RawQuest::default()
        };
        let record = QuestRecord::from_raw(raw, &provenance());
        assert!(record.is_complete(&StubOracle::with([10])));
        assert!(record.is_complete(&StubOracle::with([20])));
        assert!(!record.is_complete(&StubOracle::with([30])));
    }

    #[test]
    fn display_shows_bracketed_list_for_variant_ids() {
        let raw = RawQuest {
            title: "Close to Home".to_string(),
            ids: vec![65660, 65621],
            area: "New Gridania".to_string(),
            level: 1,
            ..RawQuest::default()
        };
        let record = QuestRecord::from_raw(raw, &provenance());
        assert_eq!(
            record.to_string(),
            "Close to Home (Lv1, New Gridania, ID: [65660, 65621])"
        );
    }
}
