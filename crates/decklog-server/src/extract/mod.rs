//! Request extractors.
//!
//! - [`Credential`], [`Actor`] and [`AuthClaims`] carry the caller identity;
//!   [`AuthState`] verifies it before any other extractor runs.
//! - [`Json`], [`ValidateJson`], [`Path`] and [`Query`] reject with the
//!   server's JSON error body.

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{Actor, AuthClaims, AuthState, Credential};
pub use crate::extract::reject::{Json, Path, Query, ValidateJson};
