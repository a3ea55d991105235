//! Path parameter types for HTTP handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path parameters for user profile operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPathParams {
    /// Unique identifier of the user profile.
    pub user_id: Uuid,
}

/// Path parameters for record operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPathParams {
    /// Unique identifier of the record.
    pub record_id: Uuid,
}

/// Path parameters for deck operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeckPathParams {
    /// Unique identifier of the deck.
    pub deck_id: Uuid,
}

/// Path parameters for deck code operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeckCodePathParams {
    /// Unique identifier of the deck code.
    pub deck_code_id: Uuid,
}

/// Path parameters for match operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchPathParams {
    /// Unique identifier of the match.
    pub match_id: Uuid,
}
