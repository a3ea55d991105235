//! Middleware configuration for the HTTP server.
//!
//! The config types live in `decklog-server` and are grouped here so they
//! can be flattened into the CLI.

use anyhow::{Result as AnyhowResult, bail};
use clap::Args;
use decklog_server::middleware::{CorsConfig, OpenApiConfig, RecoveryConfig};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Longest accepted request timeout, in seconds.
const MAX_REQUEST_TIMEOUT: u64 = 300;

/// Middleware configuration combining CORS, OpenAPI, and recovery settings.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// CORS (Cross-Origin Resource Sharing) configuration.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// OpenAPI documentation configuration.
    #[clap(flatten)]
    pub openapi: OpenApiConfig,

    /// Recovery middleware configuration.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Validates the request timeout and documentation paths.
    pub fn validate(&self) -> AnyhowResult<()> {
        let timeout = self.recovery.request_timeout;
        if timeout == 0 || timeout > MAX_REQUEST_TIMEOUT {
            bail!(
                "request timeout of {timeout} seconds is invalid, must be between 1 and {MAX_REQUEST_TIMEOUT}"
            );
        }

        for path in [&self.openapi.open_api_json, &self.openapi.scalar_ui] {
            if !path.starts_with('/') {
                bail!("documentation path {path:?} must start with '/'");
            }
        }

        if self.openapi.open_api_json == self.openapi.scalar_ui {
            bail!("OpenAPI document and Scalar UI cannot share a path");
        }

        Ok(())
    }

    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            credentials = self.cors.allow_credentials,
            "CORS configuration",
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            openapi_path = %self.openapi.open_api_json,
            scalar_path = %self.openapi.scalar_ui,
            "OpenAPI configuration",
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            "recovery configuration",
        );
    }
}
