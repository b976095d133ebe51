//! Moderation Lifecycle Integration Tests
//!
//! Tests for the site lifecycle guards, the visibility predicate, and
//! store-level enforcement of both.

use saunamap::core::moderation::{
    authorize_delete, edit, review, submit, visible, ContentPatch, ReviewDecision,
};
use saunamap::domain::{
    Actor, Language, LocalizedEntry, LocalizedText, MapPoint, ModerationStatus,
    SiteCategory, SiteDraft, SiteRecord,
};
use saunamap::stores::{MemoryRecordStore, RecordStore, SiteQuery};
use saunamap::CoreError;

fn full_localization() -> LocalizedText {
    LocalizedText::new()
        .with(Language::Est, LocalizedEntry::new("Suitsusaun", "Kirjeldus"))
        .with(Language::Eng, LocalizedEntry::new("Smoke sauna", "Description"))
        .with(Language::Rus, LocalizedEntry::new("Баня", "Описание"))
}

fn submitted_site(owner: &Actor) -> SiteRecord {
    submit(
        owner,
        SiteDraft::new(MapPoint::new(42.0, 58.0).unwrap(), SiteCategory::Smoke)
            .with_localized(full_localization()),
    )
}

#[test]
fn test_visibility_truth_table() {
    let owner = Actor::user("liis");
    let admin = Actor::admin("mod-1");
    let stranger = Actor::user("someone-else");

    for status in [
        ModerationStatus::PendingApproval,
        ModerationStatus::Approved,
        ModerationStatus::Rejected,
    ] {
        let mut record = submitted_site(&owner);
        record.status = status;

        let approved = status == ModerationStatus::Approved;

        // visible iff approved, or admin, or owner
        assert_eq!(visible(None, &record), approved);
        assert_eq!(visible(Some(&stranger), &record), approved);
        assert!(visible(Some(&admin), &record));
        assert!(visible(Some(&owner), &record));
    }
}

#[test]
fn test_review_cycle_is_status_only() {
    let owner = Actor::user("liis");
    let admin = Actor::admin("mod-1");
    let mut record = submitted_site(&owner);

    let content_before = record.localized.clone();
    let views_before = record.view_count;

    review(&admin, &mut record, ReviewDecision::Approve).unwrap();
    review(&admin, &mut record, ReviewDecision::Reject).unwrap();
    review(&admin, &mut record, ReviewDecision::Approve).unwrap();

    assert_eq!(record.status, ModerationStatus::Approved);
    assert_eq!(record.localized, content_before);
    assert_eq!(record.view_count, views_before);
}

#[test]
fn test_owner_delete_only_while_pending() {
    let owner = Actor::user("liis");
    let admin = Actor::admin("mod-1");
    let mut record = submitted_site(&owner);

    assert!(authorize_delete(&owner, &record).is_ok());

    review(&admin, &mut record, ReviewDecision::Approve).unwrap();
    let result = authorize_delete(&owner, &record);
    assert!(matches!(result, Err(CoreError::NotAuthorized(_))));

    review(&admin, &mut record, ReviewDecision::Reject).unwrap();
    let result = authorize_delete(&owner, &record);
    assert!(matches!(result, Err(CoreError::NotAuthorized(_))));
}

#[test]
fn test_failed_guard_applies_nothing() {
    let owner = Actor::user("liis");
    let stranger = Actor::user("someone-else");
    let mut record = submitted_site(&owner);
    let before = record.clone();

    // Non-admin review
    assert!(review(&stranger, &mut record, ReviewDecision::Approve).is_err());
    // Stranger edit
    let patch = ContentPatch::new().set(Language::Est, LocalizedEntry::new("X", "Y"));
    assert!(edit(&stranger, &mut record, patch).is_err());

    assert_eq!(record, before);
}

#[test]
fn test_created_by_is_stamped_once() {
    let owner = Actor::user("liis");
    let admin = Actor::admin("mod-1");
    let mut record = submitted_site(&owner);

    // Admin edits and reviews do not move ownership
    review(&admin, &mut record, ReviewDecision::Approve).unwrap();
    let patch = ContentPatch::new().set(
        Language::Eng,
        LocalizedEntry::new("Renamed", "New description"),
    );
    edit(&admin, &mut record, patch).unwrap();

    assert_eq!(record.created_by, owner.id);
}

#[tokio::test]
async fn test_store_listing_enforces_visibility() {
    let owner = Actor::user("liis");
    let admin = Actor::admin("mod-1");
    let stranger = Actor::user("someone-else");

    let mut approved = submitted_site(&owner);
    review(&admin, &mut approved, ReviewDecision::Approve).unwrap();
    let pending = submitted_site(&owner);
    let mut rejected = submitted_site(&owner);
    review(&admin, &mut rejected, ReviewDecision::Reject).unwrap();

    let store =
        MemoryRecordStore::with_records(vec![approved, pending, rejected]);

    assert_eq!(store.list(&SiteQuery::anonymous()).await.unwrap().len(), 1);
    assert_eq!(
        store
            .list(&SiteQuery::for_actor(stranger))
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        store.list(&SiteQuery::for_actor(owner)).await.unwrap().len(),
        3
    );
    assert_eq!(
        store.list(&SiteQuery::for_actor(admin)).await.unwrap().len(),
        3
    );
}

#[tokio::test]
async fn test_store_listing_category_filter() {
    let owner = Actor::user("liis");
    let admin = Actor::admin("mod-1");

    let mut smoke = submitted_site(&owner);
    review(&admin, &mut smoke, ReviewDecision::Approve).unwrap();

    let mut plunge = submit(
        &owner,
        SiteDraft::new(MapPoint::new(10.0, 10.0).unwrap(), SiteCategory::ColdPlunge)
            .with_localized(full_localization()),
    );
    review(&admin, &mut plunge, ReviewDecision::Approve).unwrap();

    let store = MemoryRecordStore::with_records(vec![smoke, plunge]);

    let query = SiteQuery::anonymous().with_category(SiteCategory::ColdPlunge);
    let listed = store.list(&query).await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].category, SiteCategory::ColdPlunge);
}
