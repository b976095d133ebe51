//! Pure, order-preserving filters over site records and catalog entries.
//!
//! All filters borrow their input, preserve input order, and never mutate.

use crate::core::moderation;
use crate::domain::actor::Actor;
use crate::domain::resource::{LearningResource, ResourceKind};
use crate::domain::site::{SiteCategory, SiteRecord};

/// Narrow sites to a category. Identity filter when `selected` is `None`.
pub fn by_category(
    sites: &[SiteRecord],
    selected: Option<SiteCategory>,
) -> Vec<&SiteRecord> {
    match selected {
        None => sites.iter().collect(),
        Some(category) => sites.iter().filter(|s| s.category == category).collect(),
    }
}

/// Narrow catalog entries to a kind. Identity filter when `selected` is
/// `None`.
pub fn by_kind(
    resources: &[LearningResource],
    selected: Option<ResourceKind>,
) -> Vec<&LearningResource> {
    match selected {
        None => resources.iter().collect(),
        Some(kind) => resources.iter().filter(|r| r.kind == kind).collect(),
    }
}

/// Narrow sites to what the actor may see, applying the moderation
/// visibility predicate to every record.
pub fn visible_sites<'a>(
    sites: &'a [SiteRecord],
    actor: Option<&Actor>,
) -> Vec<&'a SiteRecord> {
    sites
        .iter()
        .filter(|record| moderation::visible(actor, record))
        .collect()
}
