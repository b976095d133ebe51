//! Learning-material catalog entries and their locators.
//!
//! Entries are immutable from the viewer's perspective; administrators manage
//! the catalog out of band. Each kind resolves to a different access method,
//! see `core::resolver`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Resource identifier (SHA256 of the primary locator, first 16 hex chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(String);

impl ResourceId {
    /// Derive the identifier from a locator. The external URL is the primary
    /// source when present, the stored-file reference otherwise.
    pub fn from_locator(locator: &Locator) -> Self {
        let source = match locator {
            Locator::Url(url) | Locator::UrlAndFile { url, .. } => url,
            Locator::File(file) => file,
        };

        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        let result = hasher.finalize();

        let hash: String = result[..8].iter().map(|b| format!("{:02x}", b)).collect();
        Self(hash)
    }

    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Readable document (PDF, article)
    Document,

    /// Slide deck, downloaded rather than embedded
    SlideDeck,

    /// Video with an embeddable player
    Video,

    /// Interactive exercise, always opened externally
    Interactive,
}

impl ResourceKind {
    /// Deterministic thumbnail used when an entry carries none
    pub fn default_thumbnail(&self) -> &'static str {
        match self {
            ResourceKind::Document => "thumbnails/document.svg",
            ResourceKind::SlideDeck => "thumbnails/slide_deck.svg",
            ResourceKind::Video => "thumbnails/video.svg",
            ResourceKind::Interactive => "thumbnails/interactive.svg",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Document => write!(f, "document"),
            ResourceKind::SlideDeck => write!(f, "slide_deck"),
            ResourceKind::Video => write!(f, "video"),
            ResourceKind::Interactive => write!(f, "interactive"),
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "document" | "doc" | "pdf" => Ok(ResourceKind::Document),
            "slide_deck" | "slides" | "deck" => Ok(ResourceKind::SlideDeck),
            "video" => Ok(ResourceKind::Video),
            "interactive" | "exercise" => Ok(ResourceKind::Interactive),
            _ => anyhow::bail!("Unknown resource kind: {}", s),
        }
    }
}

/// Where the viewable artifact lives. At least one source is present by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locator {
    /// External URL only
    Url(String),

    /// Stored-file reference only
    File(String),

    /// Both available. The URL wins for inline viewing, the file for
    /// downloads.
    UrlAndFile { url: String, file: String },
}

impl Locator {
    /// Build a locator from optional parts. The boundary constructor for
    /// foreign data; fails when both parts are absent.
    pub fn from_parts(
        url: Option<String>,
        file: Option<String>,
    ) -> Result<Self, CoreError> {
        match (url, file) {
            (Some(url), Some(file)) => Ok(Locator::UrlAndFile { url, file }),
            (Some(url), None) => Ok(Locator::Url(url)),
            (None, Some(file)) => Ok(Locator::File(file)),
            (None, None) => Err(CoreError::EmptyLocator),
        }
    }

    /// External URL, if present
    pub fn url(&self) -> Option<&str> {
        match self {
            Locator::Url(url) | Locator::UrlAndFile { url, .. } => Some(url),
            Locator::File(_) => None,
        }
    }

    /// Stored-file reference, if present
    pub fn file(&self) -> Option<&str> {
        match self {
            Locator::File(file) | Locator::UrlAndFile { file, .. } => Some(file),
            Locator::Url(_) => None,
        }
    }
}

/// A learning/education resource with a type-specific access method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    /// Locator-derived identifier
    pub id: ResourceId,

    /// Human-readable title
    pub title: String,

    /// Resource type driving resolution
    pub kind: ResourceKind,

    /// Where the artifact lives
    pub locator: Locator,

    /// Explicit thumbnail; the per-kind default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Grouping tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// When the entry was added to the catalog
    pub added_at: DateTime<Utc>,
}

impl LearningResource {
    /// Create a new catalog entry
    pub fn new(title: impl Into<String>, kind: ResourceKind, locator: Locator) -> Self {
        Self {
            id: ResourceId::from_locator(&locator),
            title: title.into(),
            kind,
            locator,
            thumbnail: None,
            tags: Vec::new(),
            added_at: Utc::now(),
        }
    }

    /// Use an explicit thumbnail
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Explicit thumbnail or the deterministic per-kind default
    pub fn thumbnail_or_default(&self) -> &str {
        self.thumbnail
            .as_deref()
            .unwrap_or_else(|| self.kind.default_thumbnail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id_deterministic() {
        let a = ResourceId::from_locator(&Locator::Url("https://example.com/a.pdf".into()));
        let b = ResourceId::from_locator(&Locator::Url("https://example.com/a.pdf".into()));
        let c = ResourceId::from_locator(&Locator::Url("https://example.com/b.pdf".into()));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str().len(), 16);
    }

    #[test]
    fn test_resource_id_prefers_url() {
        let url_only = ResourceId::from_locator(&Locator::Url("https://example.com/a".into()));
        let both = ResourceId::from_locator(&Locator::UrlAndFile {
            url: "https://example.com/a".into(),
            file: "decks/a.pptx".into(),
        });

        assert_eq!(url_only, both);
    }

    #[test]
    fn test_locator_from_parts() {
        assert!(matches!(
            Locator::from_parts(Some("https://x".into()), None),
            Ok(Locator::Url(_))
        ));
        assert!(matches!(
            Locator::from_parts(None, Some("docs/a.pdf".into())),
            Ok(Locator::File(_))
        ));
        assert!(matches!(
            Locator::from_parts(None, None),
            Err(CoreError::EmptyLocator)
        ));
    }

    #[test]
    fn test_default_thumbnail() {
        let entry = LearningResource::new(
            "Sauna history",
            ResourceKind::Video,
            Locator::Url("https://youtu.be/abc12345678".into()),
        );
        assert_eq!(entry.thumbnail_or_default(), "thumbnails/video.svg");

        let entry = entry.with_thumbnail("thumbnails/custom.png");
        assert_eq!(entry.thumbnail_or_default(), "thumbnails/custom.png");
    }
}
