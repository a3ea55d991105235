//! Health monitoring response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Liveness response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    /// Whether the backing store accepts requests.
    pub is_healthy: bool,
    /// Timestamp when the status was computed.
    pub checked_at: Timestamp,
}
