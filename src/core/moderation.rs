//! Moderation lifecycle for site records.
//!
//! Guards are checked before any field is touched; a failed guard leaves the
//! record exactly as it was. Status changes never touch localized content and
//! content edits never touch status.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::info;

use crate::domain::actor::Actor;
use crate::domain::localized::{Language, LocalizedEntry};
use crate::domain::site::{ModerationStatus, SiteDraft, SiteId, SiteRecord};
use crate::error::CoreError;

/// Admin decision applied during review or re-review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    fn target_status(self) -> ModerationStatus {
        match self {
            ReviewDecision::Approve => ModerationStatus::Approved,
            ReviewDecision::Reject => ModerationStatus::Rejected,
        }
    }
}

/// Content-only changes applied through [`edit`]
#[derive(Debug, Clone, Default)]
pub struct ContentPatch {
    entries: BTreeMap<Language, LocalizedEntry>,
}

impl ContentPatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry for a language
    pub fn set(mut self, language: Language, entry: LocalizedEntry) -> Self {
        self.entries.insert(language, entry);
        self
    }

    /// Patch carries no changes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Create a record in `PendingApproval`. Any authenticated identity may
/// submit; the caller becomes `created_by`.
pub fn submit(actor: &Actor, draft: SiteDraft) -> SiteRecord {
    let now = Utc::now();
    let record = SiteRecord {
        id: draft.id.unwrap_or_else(SiteId::generate),
        internal_id: None,
        point: draft.point,
        geo: draft.geo,
        category: draft.category,
        localized: draft.localized,
        status: ModerationStatus::PendingApproval,
        created_by: actor.id.clone(),
        view_count: 0,
        submitted_at: now,
        updated_at: now,
    };

    info!(site = %record.id, by = %actor.id, "site submitted for review");
    record
}

/// Apply an admin review decision. Callable from any current status, so a
/// re-review is an explicit transition rather than a silent overwrite; the
/// prior status is returned and logged. Approval requires complete
/// localization. Only `status` and `updated_at` change.
pub fn review(
    actor: &Actor,
    record: &mut SiteRecord,
    decision: ReviewDecision,
) -> Result<ModerationStatus, CoreError> {
    if !actor.is_admin() {
        return Err(CoreError::NotAuthorized(format!(
            "only admins may review site {}",
            record.id
        )));
    }

    if decision == ReviewDecision::Approve {
        let missing = record.localized.missing_languages();
        if !missing.is_empty() {
            return Err(CoreError::IncompleteLocalization(missing));
        }
    }

    let previous = record.status;
    record.status = decision.target_status();
    record.updated_at = Utc::now();

    info!(
        site = %record.id,
        by = %actor.id,
        from = %previous,
        to = %record.status,
        "moderation status changed"
    );
    Ok(previous)
}

/// Apply a content patch. Allowed for the owner or an admin; mutates
/// `localized` only and does not reset moderation status.
pub fn edit(
    actor: &Actor,
    record: &mut SiteRecord,
    patch: ContentPatch,
) -> Result<(), CoreError> {
    if !can_edit(actor, record) {
        return Err(CoreError::NotAuthorized(format!(
            "{} may not edit site {}",
            actor.id, record.id
        )));
    }

    for (language, entry) in patch.entries {
        record.localized.insert(language, entry);
    }
    record.updated_at = Utc::now();

    Ok(())
}

fn can_edit(actor: &Actor, record: &SiteRecord) -> bool {
    actor.is_admin() || actor.id == record.created_by
}

/// Check the deletion guard. Admins may always delete; the owner only while
/// the record is still pending, so an owner cannot hide moderation history.
pub fn authorize_delete(actor: &Actor, record: &SiteRecord) -> Result<(), CoreError> {
    if actor.is_admin() {
        return Ok(());
    }
    if actor.id == record.created_by && record.is_pending() {
        return Ok(());
    }

    Err(CoreError::NotAuthorized(format!(
        "{} may not delete site {} in status {}",
        actor.id, record.id, record.status
    )))
}

/// Visibility predicate. Applied at query time by stores and defensively at
/// render time.
pub fn visible(actor: Option<&Actor>, record: &SiteRecord) -> bool {
    record.is_approved()
        || actor.map_or(false, |a| a.is_admin() || a.id == record.created_by)
}
