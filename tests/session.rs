//! Viewer Session Integration Tests
//!
//! Tests for the single-slot inspector session, in particular the
//! stale-resolution guard when entries are replaced mid-flight.

use saunamap::core::resolver::{resolve, ResolvedAccess};
use saunamap::core::session::{ViewState, ViewerSession};
use saunamap::domain::{LearningResource, Locator, ResourceKind};
use saunamap::stores::MemoryFileStore;

fn video(url: &str, title: &str) -> LearningResource {
    LearningResource::new(title, ResourceKind::Video, Locator::Url(url.into()))
}

#[tokio::test]
async fn test_replacement_during_inflight_resolution() {
    let files = MemoryFileStore::new("https://files.example.org");
    let mut session = ViewerSession::new();

    let a = video("https://youtu.be/aaaaaaaaaaa", "First");
    let b = video("https://youtu.be/bbbbbbbbbbb", "Second");
    let a_id = a.id.clone();
    let b_id = b.id.clone();

    // Open A and start resolving it
    session.open(a.clone());
    let a_resolution = resolve(&a, &files).await;

    // B replaces A before A's resolution is applied
    session.open(b.clone());

    // A's late answer must not touch the session
    assert!(!session.apply_resolution(&a_id, a_resolution));
    assert_eq!(session.active().map(|r| &r.id), Some(&b_id));
    assert_eq!(session.state(), Some(&ViewState::Resolving));

    // B's own resolution applies normally
    let b_resolution = resolve(&b, &files).await;
    assert!(session.apply_resolution(&b_id, b_resolution));
    assert_eq!(
        session.state(),
        Some(&ViewState::Ready(ResolvedAccess::Embed {
            url: "https://www.youtube.com/embed/bbbbbbbbbbb".into()
        }))
    );
}

#[tokio::test]
async fn test_resolution_error_keeps_session_usable() {
    let files = MemoryFileStore::new("https://files.example.org");
    let mut session = ViewerSession::new();

    let broken = video("https://example.org/talk.mp4", "Broken");
    let id = broken.id.clone();

    session.open(broken);
    let outcome = resolve(session.active().unwrap(), &files).await;
    assert!(session.apply_resolution(&id, outcome));

    // Session survives the failure with retry and escape hatch available
    assert!(session.is_open());
    assert!(matches!(session.state(), Some(ViewState::Failed { .. })));
    assert_eq!(
        session.external_fallback(),
        Some("https://example.org/talk.mp4")
    );

    assert!(session.retry());
    assert_eq!(session.state(), Some(&ViewState::Resolving));
}

#[test]
fn test_close_then_stale_answer() {
    let mut session = ViewerSession::new();
    let a = video("https://youtu.be/aaaaaaaaaaa", "First");
    let a_id = a.id.clone();

    session.open(a);
    session.close();

    let applied = session.apply_resolution(
        &a_id,
        Ok(ResolvedAccess::Embed {
            url: "https://www.youtube.com/embed/aaaaaaaaaaa".into(),
        }),
    );

    assert!(!applied);
    assert!(!session.is_open());
    assert!(session.state().is_none());
}

#[test]
fn test_single_slot_no_stacking() {
    let mut session = ViewerSession::new();

    session.open(video("https://youtu.be/aaaaaaaaaaa", "First"));
    session.open(video("https://youtu.be/bbbbbbbbbbb", "Second"));
    session.close();

    // Closing after two opens leaves nothing behind
    assert!(!session.is_open());
    assert!(session.active().is_none());
}
