//! In-memory stores for tests and demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{FileStore, RecordStore, SiteQuery};
use crate::core::moderation;
use crate::domain::site::{SiteId, SiteRecord};
use crate::error::CoreError;

/// Record store holding everything in memory
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<SiteRecord>>,
}

impl MemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_records(records: Vec<SiteRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self, query: &SiteQuery) -> Result<Vec<SiteRecord>, CoreError> {
        let records = self.records.read().await;

        Ok(records
            .iter()
            .filter(|r| moderation::visible(query.viewer.as_ref(), r))
            .filter(|r| query.category.map_or(true, |c| r.category == c))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &SiteId) -> Result<SiteRecord, CoreError> {
        let records = self.records.read().await;

        records
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, record: SiteRecord) -> Result<(), CoreError> {
        let mut records = self.records.write().await;

        if records.iter().any(|r| r.id == record.id) {
            return Err(CoreError::StoreUnavailable(format!(
                "site {} already exists",
                record.id
            )));
        }

        records.push(record);
        Ok(())
    }

    async fn update(&self, id: &SiteId, record: SiteRecord) -> Result<(), CoreError> {
        let mut records = self.records.write().await;

        let position = records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        records[position] = record;
        Ok(())
    }

    async fn delete(&self, id: &SiteId) -> Result<(), CoreError> {
        let mut records = self.records.write().await;

        let position = records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        records.remove(position);
        Ok(())
    }
}

/// File store holding blobs in memory. `set_offline` makes every call fail
/// with `StoreUnavailable`, for exercising degraded paths.
pub struct MemoryFileStore {
    base_url: String,
    files: RwLock<HashMap<String, Vec<u8>>>,
    offline: AtomicBool,
}

impl MemoryFileStore {
    /// Create an empty store minting URLs under `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            files: RwLock::new(HashMap::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Store a blob
    pub async fn put(&self, path: impl Into<String>, bytes: Vec<u8>) {
        self.files.write().await.insert(path.into(), bytes);
    }

    /// Toggle simulated outage
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), CoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CoreError::StoreUnavailable(
                "file store offline".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn download(&self, path: &str) -> Result<Vec<u8>, CoreError> {
        self.check_online()?;

        let files = self.files.read().await;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(path.to_string()))
    }

    async fn public_url(&self, path: &str) -> Result<String, CoreError> {
        self.check_online()?;
        Ok(format!(
            "{}/{}",
            self.base_url,
            path.trim_start_matches('/')
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_file_store_round_trip() {
        let store = MemoryFileStore::new("https://files.example.org");
        store.put("docs/a.pdf", b"pdf-bytes".to_vec()).await;

        assert_eq!(store.download("docs/a.pdf").await.unwrap(), b"pdf-bytes");
        assert!(matches!(
            store.download("docs/missing.pdf").await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_offline_store_fails_everything() {
        let store = MemoryFileStore::new("https://files.example.org");
        store.put("docs/a.pdf", b"pdf-bytes".to_vec()).await;
        store.set_offline(true);

        assert!(matches!(
            store.download("docs/a.pdf").await,
            Err(CoreError::StoreUnavailable(_))
        ));
        assert!(matches!(
            store.public_url("docs/a.pdf").await,
            Err(CoreError::StoreUnavailable(_))
        ));
    }
}
