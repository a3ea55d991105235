use std::convert::Infallible;
use std::fmt;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;

/// The bearer credential presented with a request, before verification.
///
/// Extraction never fails; whether an absent or malformed credential is
/// acceptable is decided by the authentication step of the route.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// No `Authorization` header, an empty one, or a bearer scheme without
    /// a token.
    Absent,
    /// A bearer token, not yet verified.
    Bearer(String),
    /// An `Authorization` header that is not a bearer credential.
    Malformed,
}

impl Credential {
    /// Returns whether no credential was presented.
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    fn from_parts_headers(parts: &Parts) -> Option<Self> {
        let value = parts.headers.get(AUTHORIZATION)?;
        let value = value.as_bytes().trim_ascii();
        if value.is_empty() || value.eq_ignore_ascii_case(b"bearer") {
            return Some(Self::Absent);
        }

        None
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Self::Malformed => f.write_str("Malformed"),
        }
    }
}

impl<S> FromRequestParts<S> for Credential
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(credential) = Self::from_parts_headers(parts) {
            return Ok(credential);
        }

        type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;
        let credential = match AuthBearerHeader::from_request_parts(parts, state).await {
            Ok(TypedHeader(header)) => match header.token().trim() {
                "" => Self::Absent,
                token => Self::Bearer(token.to_owned()),
            },
            Err(rejection) => match rejection.reason() {
                TypedHeaderRejectionReason::Missing => Self::Absent,
                _ => Self::Malformed,
            },
        };

        Ok(credential)
    }
}

impl aide::OperationInput for Credential {}
