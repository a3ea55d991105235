//! Deck request types.

use decklog_store::model::{NewDeck, UpdateDeck as UpdateDeckModel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for creating a deck.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeck {
    /// Deck name (1-64 characters).
    #[validate(length(min = 1, max = 64))]
    pub name: String,
}

impl CreateDeck {
    /// Converts this request into a [`NewDeck`] owned by `uid`.
    #[inline]
    pub fn into_model(self, uid: &str) -> NewDeck {
        NewDeck {
            user_uid: uid.to_owned(),
            name: self.name,
        }
    }
}

/// Request payload for renaming a deck.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeck {
    /// Updated deck name (1-64 characters).
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,
}

impl UpdateDeck {
    /// Converts this request into an [`UpdateDeckModel`].
    #[inline]
    pub fn into_model(self) -> UpdateDeckModel {
        UpdateDeckModel { name: self.name }
    }
}

/// Query parameters for listing decks.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct ListDecksQuery {
    /// Only archived decks when `true`, only active ones when `false`.
    pub archived: Option<bool>,
}
