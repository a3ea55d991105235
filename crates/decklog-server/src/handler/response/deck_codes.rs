//! Deck code response types.

use decklog_store::model;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Deck code response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeckCode {
    /// Unique deck code identifier.
    pub deck_code_id: Uuid,
    /// Token subject of the owner.
    pub user_uid: String,
    /// Deck the code was registered under.
    pub deck_id: Uuid,
    /// Official deck code.
    pub code: String,
    /// Whether the code is hidden from other users.
    pub is_private: bool,
    /// Free-form note.
    pub memo: Option<String>,
    /// Timestamp when the code was registered.
    pub created_at: Timestamp,
    /// Timestamp when the code was last modified.
    pub updated_at: Timestamp,
}

impl From<model::DeckCode> for DeckCode {
    fn from(code: model::DeckCode) -> Self {
        Self {
            deck_code_id: code.id,
            user_uid: code.user_uid,
            deck_id: code.deck_id,
            code: code.code,
            is_private: code.is_private,
            memo: code.memo,
            created_at: code.created_at,
            updated_at: code.updated_at,
        }
    }
}

/// Response for listing deck codes.
pub type DeckCodesPage = super::Page<DeckCode>;
