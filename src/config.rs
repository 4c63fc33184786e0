use serde::Deserialize;
use serde::Serialize;
use std::path::PathBuf;

/// A landmark quest whose completion reveals one fact about the player,
/// e.g. which city they started in. Any listed id completing counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub ids: Vec<u32>,
    /// Value detected when the landmark is complete.
    pub value: String,
}

impl Landmark {
    pub fn new(ids: impl Into<Vec<u32>>, value: impl Into<String>) -> Self {
        Self {
            ids: ids.into(),
            value: value.into(),
        }
    }
}

/// Configuration for loading quest data and detecting player context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Root directory holding the quest collection tree.
    pub data_dir: PathBuf,

    /// File name reserved for the milestone table; never scanned as a
    /// collection document.
    #[serde(default = "default_toc_file_name")]
    pub toc_file_name: String,

    /// Landmarks probed in priority order to detect the starting city;
    /// the first complete landmark wins.
    #[serde(default = "default_start_city_landmarks")]
    pub start_city_landmarks: Vec<Landmark>,

    /// Landmarks probed in priority order to detect the grand company.
    #[serde(default = "default_grand_company_landmarks")]
    pub grand_company_landmarks: Vec<Landmark>,
}

fn default_toc_file_name() -> String {
    "toc.json".to_string()
}

// The first quest of each starting city. Two ids per city: the original
// quest and its post-rework replacement.
fn default_start_city_landmarks() -> Vec<Landmark> {
    vec![
        Landmark::new([65575, 65660], "Gridania"),
        Landmark::new([65643, 65659], "Limsa Lominsa"),
        Landmark::new([66104, 65661], "Ul'dah"),
    ]
}

// Grand company enlistment quests.
fn default_grand_company_landmarks() -> Vec<Landmark> {
    vec![
        Landmark::new([66216], "Order of the Twin Adder"),
        Landmark::new([66217], "Maelstrom"),
        Landmark::new([66218], "Immortal Flames"),
    ]
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Data"),
            toc_file_name: default_toc_file_name(),
            start_city_landmarks: default_start_city_landmarks(),
            grand_company_landmarks: default_grand_company_landmarks(),
        }
    }
}

impl CatalogConfig {
    /// Config rooted at a specific data directory, defaults elsewhere.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Full path of the reserved milestone-table file.
    pub fn toc_path(&self) -> PathBuf {
        self.data_dir.join(&self.toc_file_name)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.data_dir.as_os_str().is_empty() {
            return Err("data_dir must not be empty".to_string());
        }
        if self.toc_file_name.is_empty() {
            return Err("toc_file_name must not be empty".to_string());
        }
        for mark in self
            .start_city_landmarks
            .iter()
            .chain(&self.grand_company_landmarks)
        {
            if mark.ids.is_empty() {
                return Err(format!("landmark {:?} has no quest ids", mark.value));
            }
        }
        Ok(())
    }
}
