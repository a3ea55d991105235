#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for bearer token verification.
pub const TRACING_TARGET_AUTHENTICATION: &str = "decklog_server::authentication";

/// Tracing target for ownership resolution and authorization decisions.
pub const TRACING_TARGET_AUTHORIZATION: &str = "decklog_server::authorization";

/// Tracing target for match payload validation.
pub const TRACING_TARGET_VALIDATION: &str = "decklog_server::validation";

mod error;

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod policy;
pub mod service;
pub mod validate;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
