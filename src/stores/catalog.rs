//! JSON-file index of the learning-resource catalog.
//!
//! Administrators manage entries out of band; the application only reads.
//! Kept as a simple searchable index, loaded whole.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::domain::resource::{LearningResource, ResourceId, ResourceKind};
use crate::error::CoreError;

/// Catalog of learning resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceCatalog {
    /// Catalog format version
    pub version: u32,

    /// All catalog entries
    pub items: Vec<LearningResource>,
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            version: 1,
            items: Vec::new(),
        }
    }

    /// Load the catalog from the configured default location
    pub async fn load_default() -> Result<Self, CoreError> {
        let path = crate::config::catalog_path()
            .map_err(|e| CoreError::StoreUnavailable(e.to_string()))?;
        Self::load_from(&path).await
    }

    /// Load a catalog from disk; a missing file is an empty catalog
    pub async fn load_from(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            CoreError::StoreUnavailable(format!("reading {}: {e}", path.display()))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            CoreError::StoreUnavailable(format!("parsing {}: {e}", path.display()))
        })
    }

    /// Save the catalog to disk
    pub async fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::StoreUnavailable(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::StoreUnavailable(e.to_string()))?;

        fs::write(path, content).await.map_err(|e| {
            CoreError::StoreUnavailable(format!("writing {}: {e}", path.display()))
        })
    }

    /// Add an entry, replacing any existing entry with the same id
    pub fn add(&mut self, item: LearningResource) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            *existing = item;
        } else {
            self.items.push(item);
        }
    }

    /// Get an entry by id
    pub fn get(&self, id: &ResourceId) -> Option<&LearningResource> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Remove an entry by id
    pub fn remove(&mut self, id: &ResourceId) -> Option<LearningResource> {
        self.items
            .iter()
            .position(|i| &i.id == id)
            .map(|position| self.items.remove(position))
    }

    /// Search entries by query (case-insensitive substring over title and
    /// tags)
    pub fn search(&self, query: &str) -> Vec<&LearningResource> {
        let query_lower = query.to_lowercase();

        self.items
            .iter()
            .filter(|item| {
                item.title.to_lowercase().contains(&query_lower)
                    || item
                        .tags
                        .iter()
                        .any(|t| t.to_lowercase().contains(&query_lower))
            })
            .collect()
    }

    /// Filter entries by kind, preserving catalog order
    pub fn filter_by_kind(&self, kind: ResourceKind) -> Vec<&LearningResource> {
        self.items.iter().filter(|item| item.kind == kind).collect()
    }

    /// All entries sorted by added_at (most recent first)
    pub fn list(&self, limit: Option<usize>) -> Vec<&LearningResource> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| b.added_at.cmp(&a.added_at));

        if let Some(limit) = limit {
            items.truncate(limit);
        }

        items
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resource::Locator;
    use tempfile::TempDir;

    fn video_entry(url: &str, title: &str) -> LearningResource {
        LearningResource::new(title, ResourceKind::Video, Locator::Url(url.into()))
    }

    #[test]
    fn test_add_replaces_same_id() {
        let mut catalog = ResourceCatalog::new();

        catalog.add(video_entry("https://youtu.be/abc12345678", "First title"));
        catalog.add(video_entry("https://youtu.be/abc12345678", "Second title"));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.items[0].title, "Second title");
    }

    #[test]
    fn test_search_title_and_tags() {
        let mut catalog = ResourceCatalog::new();

        catalog.add(
            video_entry("https://youtu.be/abc12345678", "Heating a smoke sauna")
                .with_tag("heritage"),
        );
        catalog.add(
            LearningResource::new(
                "Stone selection",
                ResourceKind::Document,
                Locator::File("docs/stones.pdf".into()),
            )
            .with_tag("construction"),
        );

        assert_eq!(catalog.search("smoke").len(), 1);
        assert_eq!(catalog.search("CONSTRUCTION").len(), 1);
        assert_eq!(catalog.search("nothing").len(), 0);
    }

    #[test]
    fn test_filter_by_kind() {
        let mut catalog = ResourceCatalog::new();

        catalog.add(video_entry("https://youtu.be/abc12345678", "Video 1"));
        catalog.add(video_entry("https://youtu.be/def12345678", "Video 2"));
        catalog.add(LearningResource::new(
            "Guide",
            ResourceKind::Document,
            Locator::File("docs/guide.pdf".into()),
        ));

        assert_eq!(catalog.filter_by_kind(ResourceKind::Video).len(), 2);
        assert_eq!(catalog.filter_by_kind(ResourceKind::Document).len(), 1);
        assert_eq!(catalog.filter_by_kind(ResourceKind::Interactive).len(), 0);
    }

    #[tokio::test]
    async fn test_disk_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("resources.json");

        let mut catalog = ResourceCatalog::new();
        catalog.add(video_entry("https://youtu.be/abc12345678", "Video"));
        catalog.save_to(&path).await.unwrap();

        let loaded = ResourceCatalog::load_from(&path).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.items[0].title, "Video");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let catalog = ResourceCatalog::load_from(&temp.path().join("none.json"))
            .await
            .unwrap();
        assert!(catalog.is_empty());
    }
}
