//! Narrow interfaces to the record store and the file store.
//!
//! The production backends live behind these traits; the crate ships
//! reference implementations (a JSON-file registry and catalog, an HTTP file
//! store, and in-memory stores for tests and demos).

use async_trait::async_trait;

use crate::domain::actor::Actor;
use crate::domain::site::{SiteCategory, SiteId, SiteRecord};
use crate::error::CoreError;

pub mod catalog;
pub mod http;
pub mod memory;
pub mod registry;

// Re-export the store implementations
pub use catalog::ResourceCatalog;
pub use http::HttpFileStore;
pub use memory::{MemoryFileStore, MemoryRecordStore};
pub use registry::SiteRegistry;

/// Query narrowing a record listing. Carries the viewing actor so
/// implementations enforce the visibility predicate server-side; callers
/// still filter defensively at render time.
#[derive(Debug, Clone, Default)]
pub struct SiteQuery {
    /// Exact-match category filter, all categories when absent
    pub category: Option<SiteCategory>,

    /// Viewing identity, anonymous when absent
    pub viewer: Option<Actor>,
}

impl SiteQuery {
    /// Anonymous query over all categories
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Query as a specific actor
    pub fn for_actor(actor: Actor) -> Self {
        Self {
            category: None,
            viewer: Some(actor),
        }
    }

    /// Narrow to a category
    pub fn with_category(mut self, category: SiteCategory) -> Self {
        self.category = Some(category);
        self
    }
}

/// Site record store
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List records the querying actor may see, in storage order
    async fn list(&self, query: &SiteQuery) -> Result<Vec<SiteRecord>, CoreError>;

    /// Fetch one record
    async fn get(&self, id: &SiteId) -> Result<SiteRecord, CoreError>;

    /// Insert a new record
    async fn insert(&self, record: SiteRecord) -> Result<(), CoreError>;

    /// Replace an existing record
    async fn update(&self, id: &SiteId, record: SiteRecord) -> Result<(), CoreError>;

    /// Remove a record
    async fn delete(&self, id: &SiteId) -> Result<(), CoreError>;
}

/// File store for stored-file references
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Fetch the raw bytes of a stored file
    async fn download(&self, path: &str) -> Result<Vec<u8>, CoreError>;

    /// Mint a public/delegated URL for a stored file
    async fn public_url(&self, path: &str) -> Result<String, CoreError>;
}
