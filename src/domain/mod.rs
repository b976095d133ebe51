//! Domain types for the saunamap core.
//!
//! This module contains the core data structures:
//! - Actor: identities and roles
//! - Localized: parallel per-language text values
//! - Site: geolocated records with a moderation status
//! - Resource: learning-material catalog entries

pub mod actor;
pub mod localized;
pub mod resource;
pub mod site;

// Re-export commonly used types
pub use actor::{Actor, ActorId, Role};
pub use localized::{Language, LocalizedEntry, LocalizedText};
pub use resource::{LearningResource, Locator, ResourceId, ResourceKind};
pub use site::{
    GeoPoint, MapPoint, ModerationStatus, SiteCategory, SiteDraft, SiteId, SiteRecord,
};
