//! Deck response types.

use decklog_store::model;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Deck response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    /// Unique deck identifier.
    pub deck_id: Uuid,
    /// Token subject of the owner.
    pub user_uid: String,
    /// Deck name.
    pub name: String,
    /// Timestamp when the deck was archived, if it is.
    pub archived_at: Option<Timestamp>,
    /// Timestamp when the deck was created.
    pub created_at: Timestamp,
    /// Timestamp when the deck was last modified.
    pub updated_at: Timestamp,
}

impl From<model::Deck> for Deck {
    fn from(deck: model::Deck) -> Self {
        Self {
            deck_id: deck.id,
            user_uid: deck.user_uid,
            name: deck.name,
            archived_at: deck.archived_at,
            created_at: deck.created_at,
            updated_at: deck.updated_at,
        }
    }
}

/// Response for listing decks.
pub type DecksPage = super::Page<Deck>;
