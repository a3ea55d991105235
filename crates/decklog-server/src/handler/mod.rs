//! All `aide::`[`ApiRouter`]s with related `axum::`[`Handler`]s.
//!
//! The caller is authenticated by the [`AuthState`] extractor, which comes
//! before any path, query or body extractor in every handler. The handler
//! then admits the request through a [`Pipeline`] before touching the
//! store: it authorizes the actor against the addressed resource and, for
//! match reports, checks the report for consistency.
//!
//! [`ApiRouter`]: aide::axum::ApiRouter
//! [`Handler`]: axum::handler::Handler
//! [`AuthState`]: crate::extract::AuthState
//! [`Pipeline`]: crate::policy::Pipeline

mod deck_codes;
mod decks;
mod error;
mod matches;
mod monitors;
mod records;
pub mod request;
pub mod response;
mod users;

use aide::axum::ApiRouter;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with all routes and a `404` fallback.
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(users::routes())
        .merge(records::routes())
        .merge(decks::routes())
        .merge(deck_codes::routes())
        .merge(matches::routes())
        .merge(monitors::routes())
        .fallback(handler)
}
