//! Single-slot viewer session for the resource inspector.
//!
//! The session tracks which catalog entry is open. Opening never resolves the
//! resource; the rendering layer asks the resolver lazily and feeds the
//! outcome back through [`ViewerSession::apply_resolution`]. A resolution
//! that answers for an entry no longer active is discarded, so a stale
//! response can never clobber the current view.

use crate::core::resolver::ResolvedAccess;
use crate::domain::resource::{LearningResource, ResourceId};
use crate::error::CoreError;

/// What the inspector is showing for the active entry
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Resolution requested but not yet answered
    Resolving,

    /// Resource resolved, ready to render
    Ready(ResolvedAccess),

    /// Resolution failed. The session stays open; the UI shows a retry
    /// affordance and the external escape hatch.
    Failed { message: String },
}

#[derive(Debug)]
struct ActiveView {
    resource: LearningResource,
    state: ViewState,
}

/// The "currently open item" state for the inspector. Owned by the UI shell,
/// never persisted.
#[derive(Debug, Default)]
pub struct ViewerSession {
    active: Option<ActiveView>,
}

impl ViewerSession {
    /// Create a session with nothing open
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Open a resource, replacing any previously active entry. No stacking,
    /// no queue.
    pub fn open(&mut self, resource: LearningResource) {
        self.active = Some(ActiveView {
            resource,
            state: ViewState::Resolving,
        });
    }

    /// Clear the active entry
    pub fn close(&mut self) {
        self.active = None;
    }

    /// An entry is active
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// The active resource, if any
    pub fn active(&self) -> Option<&LearningResource> {
        self.active.as_ref().map(|view| &view.resource)
    }

    /// View state of the active entry, if any
    pub fn state(&self) -> Option<&ViewState> {
        self.active.as_ref().map(|view| &view.state)
    }

    /// Feed a resolution outcome back into the session.
    ///
    /// `origin` is the entry the resolution was requested for. When it no
    /// longer matches the active entry the outcome is stale and is discarded
    /// without touching the session; the return value tells the caller
    /// whether the outcome was applied.
    pub fn apply_resolution(
        &mut self,
        origin: &ResourceId,
        outcome: Result<ResolvedAccess, CoreError>,
    ) -> bool {
        let Some(view) = self.active.as_mut() else {
            return false;
        };
        if view.resource.id != *origin {
            return false;
        }

        view.state = match outcome {
            Ok(access) => ViewState::Ready(access),
            Err(err) => ViewState::Failed {
                message: err.to_string(),
            },
        };
        true
    }

    /// Re-arm resolution after a failure. Returns whether anything changed.
    pub fn retry(&mut self) -> bool {
        match self.active.as_mut() {
            Some(view) if matches!(view.state, ViewState::Failed { .. }) => {
                view.state = ViewState::Resolving;
                true
            }
            _ => false,
        }
    }

    /// External URL of the active entry. The escape hatch when embedding
    /// fails.
    pub fn external_fallback(&self) -> Option<&str> {
        self.active.as_ref().and_then(|view| view.resource.locator.url())
    }
}
