//! Geolocated sauna site records and their moderation status.
//!
//! A site is pinned on the map canvas by normalized percentage coordinates.
//! Raw geographic coordinates, when present, are carried for display and
//! geocoding only and never drive pin placement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::actor::ActorId;
use super::localized::{Language, LocalizedText};
use crate::error::CoreError;

/// Stable external site identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteId(String);

impl SiteId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier for a new submission
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Site category. A rendering and grouping key only; it carries no behavior
/// beyond marker selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteCategory {
    /// Smoke sauna (traditional)
    Smoke,

    /// Wood-fired sauna
    WoodFired,

    /// Cold plunge / ice hole
    ColdPlunge,

    /// Anything else
    Other,
}

impl SiteCategory {
    /// Map marker color for this category
    pub fn marker_color(&self) -> &'static str {
        match self {
            SiteCategory::Smoke => "#7a3b1e",
            SiteCategory::WoodFired => "#c96a2b",
            SiteCategory::ColdPlunge => "#2b7bc9",
            SiteCategory::Other => "#6b6b6b",
        }
    }
}

impl std::fmt::Display for SiteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteCategory::Smoke => write!(f, "smoke"),
            SiteCategory::WoodFired => write!(f, "wood_fired"),
            SiteCategory::ColdPlunge => write!(f, "cold_plunge"),
            SiteCategory::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for SiteCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "smoke" | "traditional" => Ok(SiteCategory::Smoke),
            "wood_fired" | "wood-fired" | "wood" => Ok(SiteCategory::WoodFired),
            "cold_plunge" | "cold-plunge" | "plunge" => Ok(SiteCategory::ColdPlunge),
            "other" => Ok(SiteCategory::Other),
            _ => anyhow::bail!("Unknown site category: {}", s),
        }
    }
}

/// Normalized pin position, both axes as percentages of the map canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    x: f64,
    y: f64,
}

impl MapPoint {
    /// Create a point; both axes must lie in [0, 100]
    pub fn new(x: f64, y: f64) -> Result<Self, CoreError> {
        if !(0.0..=100.0).contains(&x) || !(0.0..=100.0).contains(&y) {
            return Err(CoreError::InvalidCoordinates { x, y });
        }
        Ok(Self { x, y })
    }

    /// Horizontal position in percent
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical position in percent
    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Raw geographic coordinates, display and geocoding only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Moderation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    /// Submitted, awaiting admin review
    PendingApproval,

    /// Publicly visible
    Approved,

    /// Hidden from the public map
    Rejected,
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModerationStatus::PendingApproval => write!(f, "pending_approval"),
            ModerationStatus::Approved => write!(f, "approved"),
            ModerationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A geolocated, localized site entry subject to moderation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Stable external identifier
    pub id: SiteId,

    /// Storage-layer identifier, if the backend assigns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<Uuid>,

    /// Pin position on the map canvas
    pub point: MapPoint,

    /// Raw coordinates for display/geocoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoPoint>,

    /// Rendering/grouping category
    pub category: SiteCategory,

    /// Per-language content
    pub localized: LocalizedText,

    /// Current moderation status
    pub status: ModerationStatus,

    /// Submitting identity, set once, immutable
    pub created_by: ActorId,

    /// Read counter, incremented only by the read path
    #[serde(default)]
    pub view_count: u64,

    /// When the record was submitted
    pub submitted_at: DateTime<Utc>,

    /// When the record was last changed
    pub updated_at: DateTime<Utc>,
}

impl SiteRecord {
    /// Record is publicly visible
    pub fn is_approved(&self) -> bool {
        self.status == ModerationStatus::Approved
    }

    /// Record awaits review
    pub fn is_pending(&self) -> bool {
        self.status == ModerationStatus::PendingApproval
    }

    /// Count one read. Only the read path calls this; owner and admin
    /// mutations leave the counter alone.
    pub fn record_view(&mut self) {
        self.view_count = self.view_count.saturating_add(1);
    }

    /// Localized name for a language, if present
    pub fn display_name(&self, language: Language) -> Option<&str> {
        self.localized.get(language).map(|entry| entry.name.as_str())
    }
}

/// Fields supplied by a submitter. Identity, status, and timestamps are
/// stamped by the submit operation.
#[derive(Debug, Clone)]
pub struct SiteDraft {
    /// Caller-chosen identifier; generated when absent
    pub id: Option<SiteId>,

    /// Pin position
    pub point: MapPoint,

    /// Raw coordinates, if known
    pub geo: Option<GeoPoint>,

    /// Category
    pub category: SiteCategory,

    /// Initial content, may be partial
    pub localized: LocalizedText,
}

impl SiteDraft {
    /// Create a draft with the required fields
    pub fn new(point: MapPoint, category: SiteCategory) -> Self {
        Self {
            id: None,
            point,
            geo: None,
            category,
            localized: LocalizedText::new(),
        }
    }

    /// Use a caller-chosen identifier
    pub fn with_id(mut self, id: SiteId) -> Self {
        self.id = Some(id);
        self
    }

    /// Attach raw coordinates
    pub fn with_geo(mut self, geo: GeoPoint) -> Self {
        self.geo = Some(geo);
        self
    }

    /// Attach initial localized content
    pub fn with_localized(mut self, localized: LocalizedText) -> Self {
        self.localized = localized;
        self
    }
}
