use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::domain::model::BaseModel;
use crate::domain::ports::StorageEngine;
use crate::domain::registry::ModelRegistry;
use crate::utils::error::Result;

/// File-backed storage engine: an in-memory index of serialized objects,
/// persisted as one JSON document mapping `Class.id` to each object's
/// `to_dict` output.
pub struct FileStorage {
    path: PathBuf,
    objects: BTreeMap<String, Map<String, Value>>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            objects: BTreeMap::new(),
        }
    }

    /// Read-only view of the in-memory index.
    pub fn all(&self) -> &BTreeMap<String, Map<String, Value>> {
        &self.objects
    }

    /// Loads the on-disk document into the index, replacing its contents.
    /// A missing file is not an error; it just means nothing was persisted
    /// yet.
    pub fn reload(&mut self) -> Result<()> {
        if !self.path.exists() {
            tracing::debug!("No store file at {}, starting empty", self.path.display());
            return Ok(());
        }
        let data = fs::read_to_string(&self.path)?;
        self.objects = serde_json::from_str(&data)?;
        tracing::debug!(
            "Reloaded {} objects from {}",
            self.objects.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Turns every serialized mapping in the index back into a model via the
    /// registry's tag dispatch.
    pub fn rehydrate_all(&self, registry: &ModelRegistry) -> Result<Vec<BaseModel>> {
        self.objects
            .values()
            .map(|map| registry.rehydrate(map))
            .collect()
    }
}

impl StorageEngine for FileStorage {
    fn register(&mut self, object: &BaseModel) -> Result<()> {
        self.objects.insert(object.storage_key(), object.to_dict());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(&self.objects)?;
        fs::write(&self.path, data)?;
        tracing::debug!(
            "Flushed {} objects to {}",
            self.objects.len(),
            self.path.display()
        );
        Ok(())
    }
}
