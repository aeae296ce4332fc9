use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{storage_key, Storage};
use crate::config::StorageConfig;
use crate::entity::Record;
use crate::error::Result;

/// Object store serialized as one JSON object `{"<Class>.<id>": record}`.
pub struct FileStorage {
    path: PathBuf,
    objects: BTreeMap<String, Record>,
}

impl FileStorage {
    /// Open the store described by `config`, loading the file when it exists.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        let mut store = Self {
            path: config.path.clone(),
            objects: BTreeMap::new(),
        };
        store.reload()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace in-memory state with the file content.
    ///
    /// A missing or empty file leaves the store empty.
    pub fn reload(&mut self) -> Result<()> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no store file yet");
            self.objects.clear();
            return Ok(());
        }

        let bytes = fs::read(&self.path)?;
        self.objects = if bytes.iter().all(u8::is_ascii_whitespace) {
            BTreeMap::new()
        } else {
            serde_json::from_slice(&bytes)?
        };
        tracing::debug!(
            path = %self.path.display(),
            objects = self.objects.len(),
            "reloaded store"
        );
        Ok(())
    }

    /// Every tracked record, keyed by `<Class>.<id>`
    pub fn all(&self) -> &BTreeMap<String, Record> {
        &self.objects
    }

    /// Records of a single class
    pub fn all_of<'a>(&'a self, class_name: &str) -> impl Iterator<Item = (&'a String, &'a Record)> + 'a {
        let prefix = format!("{}.", class_name);
        self.objects
            .iter()
            .filter(move |(key, _)| key.starts_with(&prefix))
    }

    pub fn get(&self, class_name: &str, id: &str) -> Option<&Record> {
        self.objects.get(&storage_key(class_name, id))
    }

    /// Stop tracking an entity. Call [`Storage::flush`] to persist the removal.
    pub fn remove(&mut self, class_name: &str, id: &str) -> Option<Record> {
        self.objects.remove(&storage_key(class_name, id))
    }

    pub fn count(&self, class_name: &str) -> usize {
        self.all_of(class_name).count()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Storage for FileStorage {
    fn track(&mut self, key: String, record: Record) {
        self.objects.insert(key, record);
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.objects)?;
        fs::write(&self.path, json)?;
        tracing::debug!(
            path = %self.path.display(),
            objects = self.objects.len(),
            "flushed store"
        );
        Ok(())
    }
}
