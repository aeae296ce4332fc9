use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the JSON object store, relative to the working directory
pub const DEFAULT_STORAGE_FILE: &str = "file.json";

/// Configuration for the file-backed object store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding every persisted entity
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORAGE_FILE),
        }
    }
}

impl StorageConfig {
    /// Config pointing the store at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}
