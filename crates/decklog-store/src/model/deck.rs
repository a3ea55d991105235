//! Deck model.

use jiff::Timestamp;
use uuid::Uuid;

use crate::types::{HasCreatedAt, HasOwner};

/// A named deck that groups deck codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    /// Unique deck identifier.
    pub id: Uuid,
    /// Owner of the deck.
    pub user_uid: String,
    /// Display name of the deck.
    pub name: String,
    /// Timestamp when the deck was archived.
    pub archived_at: Option<Timestamp>,
    /// Timestamp when the deck was created.
    pub created_at: Timestamp,
    /// Timestamp when the deck was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new deck.
#[derive(Debug, Default, Clone)]
pub struct NewDeck {
    pub user_uid: String,
    pub name: String,
}

/// Partial changes to a deck.
#[derive(Debug, Default, Clone)]
pub struct UpdateDeck {
    pub name: Option<String>,
}

impl Deck {
    /// Returns whether the deck has been archived.
    #[inline]
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    pub(crate) fn from_new(new: NewDeck) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::now_v7(),
            user_uid: new.user_uid,
            name: new.name,
            archived_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply(&mut self, changes: UpdateDeck) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        self.updated_at = Timestamp::now();
    }
}

impl HasOwner for Deck {
    fn owner_uid(&self) -> &str {
        &self.user_uid
    }
}

impl HasCreatedAt for Deck {
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
