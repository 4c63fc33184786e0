use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuestDataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("data source not found: {}", .0.display())]
    MissingDataSource(PathBuf),
}

pub type Result<T> = std::result::Result<T, QuestDataError>;
