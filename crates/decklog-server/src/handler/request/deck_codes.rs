//! Deck code request types.

use decklog_store::model::{NewDeckCode, UpdateDeckCode as UpdateDeckCodeModel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request payload for registering a deck code.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeckCode {
    /// Official deck code (1-64 characters).
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    /// Hides the code from other users.
    #[serde(default)]
    pub is_private: bool,
    /// Free-form note (max 1024 characters).
    #[validate(length(max = 1024))]
    pub memo: Option<String>,
}

impl CreateDeckCode {
    /// Converts this request into a [`NewDeckCode`] under `deck_id`.
    #[inline]
    pub fn into_model(self, uid: &str, deck_id: Uuid) -> NewDeckCode {
        NewDeckCode {
            user_uid: uid.to_owned(),
            deck_id,
            code: self.code,
            is_private: self.is_private,
            memo: self.memo,
        }
    }
}

/// Request payload for updating a deck code.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeckCode {
    /// Updated deck code (1-64 characters).
    #[validate(length(min = 1, max = 64))]
    pub code: Option<String>,
    /// Updated privacy flag.
    pub is_private: Option<bool>,
    /// Updated note (max 1024 characters). An empty memo clears it.
    #[validate(length(max = 1024))]
    pub memo: Option<String>,
}

impl UpdateDeckCode {
    /// Converts this request into an [`UpdateDeckCodeModel`].
    #[inline]
    pub fn into_model(self) -> UpdateDeckCodeModel {
        UpdateDeckCodeModel {
            code: self.code,
            is_private: self.is_private,
            memo: self.memo.map(|memo| Some(memo).filter(|m| !m.is_empty())),
        }
    }
}
