use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schemars::JsonSchema;
use serde::Serialize;

/// HTTP error response representation.
///
/// Only `message` is serialized. It is one fixed, non-leaky string per
/// status; everything else is kept for the log line written when the
/// response is produced.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ErrorResponse<'a> {
    /// Fixed message for the status code.
    pub message: Cow<'a, str>,

    /// The error name/type identifier
    #[serde(skip)]
    pub name: Cow<'a, str>,
    /// Detailed message for debugging
    #[serde(skip)]
    pub detail: Option<Cow<'a, str>>,
    /// The resource that the error relates to
    #[serde(skip)]
    pub resource: Option<Cow<'a, str>>,
    /// Internal context for debugging
    #[serde(skip)]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new("bad_request", "bad request", StatusCode::BAD_REQUEST);
    pub const CONFLICT: Self = Self::new("conflict", "conflict", StatusCode::CONFLICT);
    pub const FORBIDDEN: Self = Self::new("forbidden", "forbidden", StatusCode::FORBIDDEN);
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "internal server error",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const NOT_FOUND: Self = Self::new("not_found", "not found", StatusCode::NOT_FOUND);
    pub const UNAUTHORIZED: Self =
        Self::new("unauthorized", "unauthorized", StatusCode::UNAUTHORIZED);

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            message: Cow::Borrowed(message),
            name: Cow::Borrowed(name),
            detail: None,
            resource: None,
            context: None,
            status,
        }
    }

    /// Attaches the resource the error relates to.
    /// If a resource already exists, it merges them with a separator.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let new_resource = resource.into();
        self.resource = Some(match self.resource {
            Some(existing) => Cow::Owned(format!("{}/{}", existing, new_resource)),
            None => new_resource,
        });
        self
    }

    /// Attaches a detailed message.
    /// If a detail already exists, it merges them with a separator.
    pub fn with_detail(mut self, detail: impl Into<Cow<'a, str>>) -> Self {
        let new_detail = detail.into();
        self.detail = Some(match self.detail {
            Some(existing) => Cow::Owned(format!("{}. {}", existing, new_detail)),
            None => new_detail,
        });
        self
    }

    /// Attaches context to the error response.
    /// If context already exists, it merges them with a separator.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                name = %self.name,
                detail = ?self.detail,
                resource = ?self.resource,
                context = ?self.context,
                "HTTP error response"
            );
        } else {
            tracing::warn!(
                status = %self.status,
                name = %self.name,
                detail = ?self.detail,
                resource = ?self.resource,
                context = ?self.context,
                "HTTP error response"
            );
        }

        (self.status, Json(self)).into_response()
    }
}
