use crate::config::CatalogConfig;
use crate::error::Result;
use crate::model::CollectionDoc;
use crate::model::Provenance;
use crate::model::QuestRecord;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::warn;
use walkdir::WalkDir;

/// A recoverable problem encountered while loading quest data. Loading
/// never fails outright; warnings are the only failure surface.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadWarning {
    /// The data root or TOC file does not exist.
    MissingDataSource { path: PathBuf },
    /// A document could not be read or parsed.
    ParseFailure { path: PathBuf, message: String },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::MissingDataSource { path } => {
                write!(f, "data source not found: {}", path.display())
            }
            LoadWarning::ParseFailure { path, message } => {
                write!(f, "failed to load {}: {message}", path.display())
            }
        }
    }
}

/// The merged, immutable quest index plus load diagnostics.
///
/// Built once at startup; every accessor takes `&self`, so concurrent
/// readers need no synchronization.
#[derive(Debug, Default)]
pub struct Catalog {
    records: Vec<QuestRecord>,
    files_loaded: usize,
    load_duration_ms: u64,
}

impl Catalog {
    /// Load every collection document under the configured data root.
    ///
    /// Files are processed in lexicographic path order so merge order is
    /// reproducible. Per-file failures are downgraded to warnings and the
    /// returned catalog holds whatever loaded cleanly, possibly nothing.
    pub fn load(config: &CatalogConfig) -> (Self, Vec<LoadWarning>) {
        let started = Instant::now();
        let mut warnings = Vec::new();

        if !config.data_dir.is_dir() {
            warn!(
                "quest data directory not found: {}",
                config.data_dir.display()
            );
            warnings.push(LoadWarning::MissingDataSource {
                path: config.data_dir.clone(),
            });
            return (Self::default(), warnings);
        }

        let files = collection_files(&config.data_dir, &config.toc_file_name);
        debug!("found {} collection files under data root", files.len());

        let mut catalog = Self::default();
        for path in files {
            match load_collection(&path) {
                Ok(doc) => catalog.absorb(doc, &path, &config.data_dir),
                Err(err) => {
                    warn!("failed to load {}: {err}", path.display());
                    warnings.push(LoadWarning::ParseFailure {
                        path,
                        message: err.to_string(),
                    });
                }
            }
        }

        catalog.load_duration_ms = started.elapsed().as_millis() as u64;
        info!(
            "loaded {} quests from {} files in {}ms",
            catalog.records.len(),
            catalog.files_loaded,
            catalog.load_duration_ms
        );
        (catalog, warnings)
    }

    /// Merge one parsed document, stamping provenance onto each record.
    fn absorb(&mut self, doc: CollectionDoc, path: &Path, root: &Path) {
        self.files_loaded += 1;
        if doc.quests.is_empty() {
            debug!("empty quest array: {}", path.display());
            return;
        }
        let provenance = Provenance {
            expansion: doc.expansion,
            patch: patch_label(root, path),
            drawer: doc.drawer,
        };
        for raw in doc.quests {
            if raw.ids.is_empty() {
                warn!(
                    "dropping quest without ids: {:?} in {}",
                    raw.title,
                    path.display()
                );
                continue;
            }
            self.records.push(QuestRecord::from_raw(raw, &provenance));
        }
    }

    /// All records in merge order.
    pub fn records(&self) -> &[QuestRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of documents parsed successfully, empty ones included.
    pub fn files_loaded(&self) -> usize {
        self.files_loaded
    }

    /// How long the load took, for diagnostics output.
    pub fn load_duration_ms(&self) -> u64 {
        self.load_duration_ms
    }

    /// First record whose id list contains `id`, in merge order. Lookup is
    /// by membership rather than primary id, so any per-city variant id
    /// resolves to its record.
    pub fn quest_by_id(&self, id: u32) -> Option<&QuestRecord> {
        self.records.iter().find(|record| record.ids.contains(&id))
    }

    /// Records belonging to an expansion, compared case-insensitively.
    pub fn quests_by_expansion<'a>(
        &'a self,
        expansion: &'a str,
    ) -> impl Iterator<Item = &'a QuestRecord> {
        self.records
            .iter()
            .filter(move |record| record.expansion.eq_ignore_ascii_case(expansion))
    }

    /// Records belonging to a patch label (exact match).
    pub fn quests_by_patch<'a>(&'a self, patch: &'a str) -> impl Iterator<Item = &'a QuestRecord> {
        self.records.iter().filter(move |record| record.patch == patch)
    }

    /// Record count per expansion.
    pub fn quest_counts_by_expansion(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for record in &self.records {
            *counts.entry(record.expansion.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Collection documents under `root`, sorted lexicographically by path.
fn collection_files(root: &Path, reserved: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if is_collection_file_name(&name, reserved) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    files
}

/// Drawer naming convention: `<digits>-<name>.json`, e.g. `1-msq.json`.
/// The reserved TOC file name never matches.
fn is_collection_file_name(name: &str, reserved: &str) -> bool {
    if name == reserved {
        return false;
    }
    let Some(stem) = name.strip_suffix(".json") else {
        return false;
    };
    let Some((prefix, drawer)) = stem.split_once('-') else {
        return false;
    };
    !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) && !drawer.is_empty()
}

/// Parent directory of `file` relative to `root`, `/`-separated.
fn patch_label(root: &Path, file: &Path) -> String {
    file.parent()
        .and_then(|dir| dir.strip_prefix(root).ok())
        .map(|rel| rel.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default()
}

fn load_collection(path: &Path) -> Result<CollectionDoc> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
