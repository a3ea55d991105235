//! Event record model.

use jiff::Timestamp;
use jiff::civil::Date;
use uuid::Uuid;

use crate::types::{HasCreatedAt, HasOwner};

/// Participation of a user in an event, the parent of its matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Unique record identifier.
    pub id: Uuid,
    /// Owner of the record.
    pub user_uid: String,
    /// Identifier of the event in the official calendar, if any.
    pub official_event_id: Option<i64>,
    /// Day the event took place.
    pub event_date: Option<Date>,
    /// Deck the owner played.
    pub deck_id: Option<Uuid>,
    /// Exact deck code the owner played.
    pub deck_code_id: Option<Uuid>,
    /// Hides the record and its matches from everyone but the owner.
    pub is_private: bool,
    /// Free-form notes.
    pub memo: Option<String>,
    /// Timestamp when the record was created.
    pub created_at: Timestamp,
    /// Timestamp when the record was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new record.
#[derive(Debug, Default, Clone)]
pub struct NewRecord {
    pub user_uid: String,
    pub official_event_id: Option<i64>,
    pub event_date: Option<Date>,
    pub deck_id: Option<Uuid>,
    pub deck_code_id: Option<Uuid>,
    pub is_private: bool,
    pub memo: Option<String>,
}

/// Partial changes to a record.
#[derive(Debug, Default, Clone)]
pub struct UpdateRecord {
    pub official_event_id: Option<Option<i64>>,
    pub event_date: Option<Option<Date>>,
    pub deck_id: Option<Option<Uuid>>,
    pub deck_code_id: Option<Option<Uuid>>,
    pub is_private: Option<bool>,
    pub memo: Option<Option<String>>,
}

impl Record {
    pub(crate) fn from_new(new: NewRecord) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::now_v7(),
            user_uid: new.user_uid,
            official_event_id: new.official_event_id,
            event_date: new.event_date,
            deck_id: new.deck_id,
            deck_code_id: new.deck_code_id,
            is_private: new.is_private,
            memo: new.memo,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply(&mut self, changes: UpdateRecord) {
        if let Some(official_event_id) = changes.official_event_id {
            self.official_event_id = official_event_id;
        }
        if let Some(event_date) = changes.event_date {
            self.event_date = event_date;
        }
        if let Some(deck_id) = changes.deck_id {
            self.deck_id = deck_id;
        }
        if let Some(deck_code_id) = changes.deck_code_id {
            self.deck_code_id = deck_code_id;
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

impl HasOwner for Record {
    fn owner_uid(&self) -> &str {
        &self.user_uid
    }
}

impl HasCreatedAt for Record {
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
