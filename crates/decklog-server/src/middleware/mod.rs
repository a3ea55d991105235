//! Middleware for `axum::Router` and HTTP request processing.
//!
//! Each concern is an extension trait over the router:
//!
//! - [`RouterRecoveryExt`]: panics, timeouts and layer failures become `500`
//!   responses with the fixed error body.
//! - [`RouterObservabilityExt`]: request ids, trace spans and redaction of
//!   credential headers.
//! - [`RouterSecurityExt`]: CORS, body limits and security headers.
//! - [`RouterOpenApiExt`]: OpenAPI JSON and the Scalar reference UI.
//!
//! ```rust,no_run
//! use axum::Router;
//! use decklog_server::handler::routes;
//! use decklog_server::middleware::*;
//! use decklog_server::service::{ServiceState, TokenVerifier};
//! use decklog_store::MemoryStore;
//!
//! let state = ServiceState::new(MemoryStore::new(), TokenVerifier::new("secret"));
//! let app: Router = routes()
//!     .with_open_api(&OpenApiConfig::default())
//!     .with_state(state)
//!     .with_default_security()
//!     .with_observability()
//!     .with_default_recovery();
//! ```

mod observability;
mod recovery;
mod security;
mod specification;

pub use self::observability::RouterObservabilityExt;
pub use self::recovery::{RecoveryConfig, RouterRecoveryExt};
pub use self::security::{
    CorsConfig, DEFAULT_MAX_BODY_SIZE, FrameOptions, ReferrerPolicy, RouterSecurityExt,
    SecurityHeadersConfig,
};
pub use self::specification::{OpenApiConfig, RouterOpenApiExt};
