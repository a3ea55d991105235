//! User profile model.

use jiff::Timestamp;
use uuid::Uuid;

use crate::types::{HasCreatedAt, HasOwner};

/// Profile of an identity known to the token issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Subject of the caller's bearer tokens.
    pub uid: String,
    /// Name shown next to public records.
    pub display_name: String,
    /// Timestamp when the profile was created.
    pub created_at: Timestamp,
    /// Timestamp when the profile was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new user profile.
#[derive(Debug, Default, Clone)]
pub struct NewUser {
    pub uid: String,
    pub display_name: String,
}

/// Partial changes to a user profile.
#[derive(Debug, Default, Clone)]
pub struct UpdateUser {
    pub display_name: Option<String>,
}

impl User {
    pub(crate) fn from_new(new: NewUser) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::now_v7(),
            uid: new.uid,
            display_name: new.display_name,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply(&mut self, changes: UpdateUser) {
        if let Some(display_name) = changes.display_name {
            self.display_name = display_name;
        }
        self.updated_at = Timestamp::now();
    }
}

impl HasOwner for User {
    fn owner_uid(&self) -> &str {
        &self.uid
    }
}

impl HasCreatedAt for User {
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
