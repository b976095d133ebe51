//! JSON-file-backed site registry.
//!
//! Reference `RecordStore` implementation used by the CLI. State lives in a
//! single JSON document loaded and rewritten whole; fine for the registry
//! sizes a heritage map sees.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;

use super::{RecordStore, SiteQuery};
use crate::core::moderation;
use crate::domain::site::{SiteId, SiteRecord};
use crate::error::CoreError;

/// Registry file format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegistryFile {
    /// Format version
    version: u32,

    /// All site records
    records: Vec<SiteRecord>,
}

impl Default for RegistryFile {
    fn default() -> Self {
        Self {
            version: 1,
            records: Vec::new(),
        }
    }
}

/// JSON-file-backed site registry
pub struct SiteRegistry {
    path: PathBuf,
}

impl SiteRegistry {
    /// Create a registry over the given file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Open the registry at the configured default location
    pub async fn open_default() -> Result<Self, CoreError> {
        let path = crate::config::registry_path()
            .map_err(|e| CoreError::StoreUnavailable(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::StoreUnavailable(e.to_string()))?;
        }

        Ok(Self::new(path))
    }

    async fn load(&self) -> Result<RegistryFile, CoreError> {
        if !self.path.exists() {
            return Ok(RegistryFile::default());
        }

        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            CoreError::StoreUnavailable(format!("reading {}: {e}", self.path.display()))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            CoreError::StoreUnavailable(format!("parsing {}: {e}", self.path.display()))
        })
    }

    async fn save(&self, file: &RegistryFile) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::StoreUnavailable(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(file)
            .map_err(|e| CoreError::StoreUnavailable(e.to_string()))?;

        fs::write(&self.path, content).await.map_err(|e| {
            CoreError::StoreUnavailable(format!("writing {}: {e}", self.path.display()))
        })
    }

    /// Count one read on a record. The read-side effect; the moderation
    /// mutation paths never touch the counter.
    pub async fn record_view(&self, id: &SiteId) -> Result<u64, CoreError> {
        let mut file = self.load().await?;

        let record = file
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        record.record_view();
        let count = record.view_count;

        self.save(&file).await?;
        Ok(count)
    }
}

#[async_trait::async_trait]
impl RecordStore for SiteRegistry {
    async fn list(&self, query: &SiteQuery) -> Result<Vec<SiteRecord>, CoreError> {
        let file = self.load().await?;

        Ok(file
            .records
            .into_iter()
            .filter(|r| moderation::visible(query.viewer.as_ref(), r))
            .filter(|r| query.category.map_or(true, |c| r.category == c))
            .collect())
    }

    async fn get(&self, id: &SiteId) -> Result<SiteRecord, CoreError> {
        let file = self.load().await?;

        file.records
            .into_iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, record: SiteRecord) -> Result<(), CoreError> {
        let mut file = self.load().await?;

        if file.records.iter().any(|r| r.id == record.id) {
            return Err(CoreError::StoreUnavailable(format!(
                "site {} already exists",
                record.id
            )));
        }

        file.records.push(record);
        self.save(&file).await
    }

    async fn update(&self, id: &SiteId, record: SiteRecord) -> Result<(), CoreError> {
        let mut file = self.load().await?;

        let position = file
            .records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        file.records[position] = record;
        self.save(&file).await
    }

    async fn delete(&self, id: &SiteId) -> Result<(), CoreError> {
        let mut file = self.load().await?;

        let position = file
            .records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        file.records.remove(position);
        self.save(&file).await
    }
}
