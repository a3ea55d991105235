//! User profile response types.

use decklog_store::model;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User profile response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique profile identifier.
    pub user_id: Uuid,
    /// Token subject the profile belongs to.
    pub uid: String,
    /// Name shown to other players.
    pub display_name: String,
    /// Timestamp when the profile was created.
    pub created_at: Timestamp,
    /// Timestamp when the profile was last modified.
    pub updated_at: Timestamp,
}

impl From<model::User> for User {
    fn from(user: model::User) -> Self {
        Self {
            user_id: user.id,
            uid: user.uid,
            display_name: user.display_name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
