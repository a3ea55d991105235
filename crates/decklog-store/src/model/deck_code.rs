//! Deck code model.

use jiff::Timestamp;
use uuid::Uuid;

use crate::types::{HasCreatedAt, HasOwner};

/// One concrete list of a deck, as exported by the official deck builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckCode {
    /// Unique deck code identifier.
    pub id: Uuid,
    /// Owner of the deck code.
    pub user_uid: String,
    /// Deck this code belongs to.
    pub deck_id: Uuid,
    /// Code issued by the deck builder.
    pub code: String,
    /// Hides the code from everyone but the owner.
    pub is_private: bool,
    /// Free-form notes.
    pub memo: Option<String>,
    /// Timestamp when the deck code was created.
    pub created_at: Timestamp,
    /// Timestamp when the deck code was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new deck code.
#[derive(Debug, Default, Clone)]
pub struct NewDeckCode {
    pub user_uid: String,
    pub deck_id: Uuid,
    pub code: String,
    pub is_private: bool,
    pub memo: Option<String>,
}

/// Partial changes to a deck code.
#[derive(Debug, Default, Clone)]
pub struct UpdateDeckCode {
    pub code: Option<String>,
    pub is_private: Option<bool>,
    pub memo: Option<Option<String>>,
}

impl DeckCode {
    pub(crate) fn from_new(new: NewDeckCode) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::now_v7(),
            user_uid: new.user_uid,
            deck_id: new.deck_id,
            code: new.code,
            is_private: new.is_private,
            memo: new.memo,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply(&mut self, changes: UpdateDeckCode) {
        if let Some(code) = changes.code {
            self.code = code;
        }
        if let Some(is_private) = changes.is_private {
            self.is_private = is_private;
        }
        if let Some(memo) = changes.memo {
            self.memo = memo;
        }
        self.updated_at = Timestamp::now();
    }
}

impl HasOwner for DeckCode {
    fn owner_uid(&self) -> &str {
        &self.user_uid
    }
}

impl HasCreatedAt for DeckCode {
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
