//! User profile request types.

use decklog_store::model::{NewUser, UpdateUser as UpdateUserModel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for creating the caller's profile.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// Name shown to other players (1-64 characters).
    #[validate(length(min = 1, max = 64))]
    pub display_name: String,
}

impl CreateUser {
    /// Converts this request into a [`NewUser`] owned by `uid`.
    #[inline]
    pub fn into_model(self, uid: &str) -> NewUser {
        NewUser {
            uid: uid.to_owned(),
            display_name: self.display_name,
        }
    }
}

/// Request payload for updating a profile.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    /// Updated display name (1-64 characters).
    #[validate(length(min = 1, max = 64))]
    pub display_name: Option<String>,
}

impl UpdateUser {
    /// Converts this request into an [`UpdateUserModel`].
    #[inline]
    pub fn into_model(self) -> UpdateUserModel {
        UpdateUserModel {
            display_name: self.display_name,
        }
    }
}
