//! Application state and dependency injection.

mod config;
mod security;

use decklog_store::MemoryStore;

pub use crate::service::config::{MIN_AUTH_SECRET_LEN, ServiceConfig};
pub use crate::service::security::{AuthError, TokenVerifier};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Tracing target for application state assembly.
const TRACING_TARGET: &str = "decklog_server::service";

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    // External services:
    pub store: MemoryStore,

    // Internal services:
    pub token_verifier: TokenVerifier,
}

impl ServiceState {
    /// Assembles application state from its parts.
    pub fn new(store: MemoryStore, token_verifier: TokenVerifier) -> Self {
        Self {
            store,
            token_verifier,
        }
    }

    /// Initializes application state from configuration.
    ///
    /// Validates the signing secret and starts with an empty store.
    pub fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        service_config.validate()?;

        tracing::info!(
            target: TRACING_TARGET,
            store = "memory",
            "Service state initialized",
        );

        Ok(Self::new(
            MemoryStore::new(),
            TokenVerifier::new(&service_config.auth_secret),
        ))
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(store: MemoryStore);

// Internal services:
impl_di!(token_verifier: TokenVerifier);
