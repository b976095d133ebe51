//! Core domain logic.
//!
//! This module contains:
//! - Moderation: site lifecycle guards and the visibility predicate
//! - Resolver: type-dispatched access resolution for learning resources
//! - Session: the single-slot inspector state machine
//! - Filter: order-preserving category/kind/visibility filters

pub mod filter;
pub mod moderation;
pub mod resolver;
pub mod session;

// Re-export commonly used types
pub use moderation::{ContentPatch, ReviewDecision};
pub use resolver::{ResolvedAccess, SlideDeckMode};
pub use session::{ViewState, ViewerSession};
