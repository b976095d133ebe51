//! saunamap - core engine for a sauna heritage map and learning library
//!
//! The crate models the content side of a localized heritage-map site:
//! geolocated sauna records moving through a moderation workflow with
//! role-gated visibility, and a learning-resource catalog whose entries
//! resolve to different access methods depending on their type.
//!
//! # Architecture
//!
//! - Records are fetched through narrow store traits, narrowed by the
//!   visibility filter, and opened one at a time in the viewer session
//! - The resolver maps a catalog entry to an embed, inline-viewer,
//!   external-action, or download affordance
//! - The moderation module owns every role-gated mutation of a site record
//!
//! # Modules
//!
//! - `domain`: Data structures (Actor, SiteRecord, LearningResource)
//! - `core`: Moderation, resolution, session, and filter logic
//! - `stores`: Store traits and reference implementations
//! - `cli`: Command-line interface

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod stores;

// Re-export main types at crate root for convenience
pub use crate::core::{
    ContentPatch, ResolvedAccess, ReviewDecision, SlideDeckMode, ViewState, ViewerSession,
};
pub use domain::{
    Actor, ActorId, Language, LearningResource, Locator, MapPoint, ModerationStatus,
    ResourceId, ResourceKind, Role, SiteCategory, SiteDraft, SiteId, SiteRecord,
};
pub use error::CoreError;
pub use stores::{FileStore, RecordStore, SiteQuery};
