//! Identities performing operations against the map and library.
//!
//! Anonymous viewers are represented as `Option<&Actor>::None` at the call
//! sites, so anonymous submission is unrepresentable.

use serde::{Deserialize, Serialize};

/// Opaque actor identifier supplied by the identity service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(String);

impl ActorId {
    /// Wrap a raw identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of an authenticated actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Standard authenticated user
    User,

    /// Administrator with moderation rights
    Admin,
}

/// An authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identity supplied by the session service
    pub id: ActorId,

    /// Role granted to this identity
    pub role: Role,
}

impl Actor {
    /// Create an actor with an explicit role
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: ActorId::new(id),
            role,
        }
    }

    /// Convenience constructor for a standard user
    pub fn user(id: impl Into<String>) -> Self {
        Self::new(id, Role::User)
    }

    /// Convenience constructor for an administrator
    pub fn admin(id: impl Into<String>) -> Self {
        Self::new(id, Role::Admin)
    }

    /// Actor holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
