#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for store lifecycle events.
///
/// Use this target for logging store creation and shutdown.
pub const TRACING_TARGET_STORE: &str = "decklog_store::store";

/// Tracing target for repository operations.
///
/// Use this target for logging reads, writes and their failures.
pub const TRACING_TARGET_QUERY: &str = "decklog_store::queries";

mod error;
pub mod model;
pub mod query;
mod store;
pub mod types;

pub use crate::error::{Entity, StoreError, StoreResult};
pub use crate::store::MemoryStore;
