//! Record response types.

use decklog_store::model;
use jiff::Timestamp;
use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique record identifier.
    pub record_id: Uuid,
    /// Token subject of the owner.
    pub user_uid: String,
    /// Identifier of the event in the official calendar.
    pub official_event_id: Option<i64>,
    /// Day the event took place.
    pub event_date: Option<Date>,
    /// Deck played at the event.
    pub deck_id: Option<Uuid>,
    /// Deck code played at the event.
    pub deck_code_id: Option<Uuid>,
    /// Whether the record is hidden from other users.
    pub is_private: bool,
    /// Free-form note.
    pub memo: Option<String>,
    /// Timestamp when the record was created.
    pub created_at: Timestamp,
    /// Timestamp when the record was last modified.
    pub updated_at: Timestamp,
}

impl From<model::Record> for Record {
    fn from(record: model::Record) -> Self {
        Self {
            record_id: record.id,
            user_uid: record.user_uid,
            official_event_id: record.official_event_id,
            event_date: record.event_date,
            deck_id: record.deck_id,
            deck_code_id: record.deck_code_id,
            is_private: record.is_private,
            memo: record.memo,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Response for listing records.
pub type RecordsPage = super::Page<Record>;
