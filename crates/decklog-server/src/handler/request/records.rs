//! Record request types.

use decklog_store::model::{NewRecord, UpdateRecord as UpdateRecordModel};
use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request payload for creating a record of one event.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecord {
    /// Identifier of the event in the official calendar.
    pub official_event_id: Option<i64>,
    /// Day the event took place.
    pub event_date: Option<Date>,
    /// Deck played at the event. Must belong to the caller.
    pub deck_id: Option<Uuid>,
    /// Deck code played at the event. Must belong to the caller.
    pub deck_code_id: Option<Uuid>,
    /// Hides the record and its matches from other users.
    #[serde(default)]
    pub is_private: bool,
    /// Free-form note (max 1024 characters).
    #[validate(length(max = 1024))]
    pub memo: Option<String>,
}

impl CreateRecord {
    /// Converts this request into a [`NewRecord`] owned by `uid`.
    #[inline]
    pub fn into_model(self, uid: &str) -> NewRecord {
        NewRecord {
            user_uid: uid.to_owned(),
            official_event_id: self.official_event_id,
            event_date: self.event_date,
            deck_id: self.deck_id,
            deck_code_id: self.deck_code_id,
            is_private: self.is_private,
            memo: self.memo,
        }
    }
}

/// Request payload for updating a record.
///
/// Absent fields are left unchanged.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecord {
    /// Updated official event identifier.
    pub official_event_id: Option<i64>,
    /// Updated event day.
    pub event_date: Option<Date>,
    /// Updated deck. Must belong to the caller.
    pub deck_id: Option<Uuid>,
    /// Updated deck code. Must belong to the caller.
    pub deck_code_id: Option<Uuid>,
    /// Updated privacy flag.
    pub is_private: Option<bool>,
    /// Updated note (max 1024 characters). An empty memo clears it.
    #[validate(length(max = 1024))]
    pub memo: Option<String>,
}

impl UpdateRecord {
    /// Converts this request into an [`UpdateRecordModel`].
    #[inline]
    pub fn into_model(self) -> UpdateRecordModel {
        UpdateRecordModel {
            official_event_id: self.official_event_id.map(Some),
            event_date: self.event_date.map(Some),
            deck_id: self.deck_id.map(Some),
            deck_code_id: self.deck_code_id.map(Some),
            is_private: self.is_private,
            memo: self.memo.map(|memo| Some(memo).filter(|m| !m.is_empty())),
        }
    }
}
