//! Verification of HS256-signed bearer tokens.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::extract::{Actor, AuthClaims};
use crate::handler::{Error, ErrorKind};

/// Reasons a bearer credential is not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No credential was presented where one is required.
    #[error("missing bearer token")]
    MissingToken,
    /// The `Authorization` header is not a bearer credential.
    #[error("malformed authorization header")]
    MalformedHeader,
    /// The token expiry has passed.
    #[error("token expired")]
    Expired,
    /// The signature does not verify under the configured secret.
    #[error("token signature does not verify")]
    InvalidSignature,
    /// The token was signed with an algorithm other than HS256.
    #[error("unexpected signing algorithm")]
    InvalidAlgorithm,
    /// The `uid` claim is absent or empty.
    #[error("subject claim is missing or empty")]
    MissingSubject,
    /// The token could not be decoded.
    #[error("invalid token: {0}")]
    Invalid(String),
}

impl From<JwtError> for AuthError {
    fn from(error: JwtError) -> Self {
        match error.kind() {
            JwtErrorKind::ExpiredSignature => Self::Expired,
            JwtErrorKind::InvalidSignature => Self::InvalidSignature,
            JwtErrorKind::InvalidAlgorithm | JwtErrorKind::InvalidAlgorithmName => {
                Self::InvalidAlgorithm
            }
            _ => Self::Invalid(error.to_string()),
        }
    }
}

impl From<AuthError> for Error<'static> {
    fn from(error: AuthError) -> Self {
        ErrorKind::Unauthorized
            .with_message(error.to_string())
            .with_resource("authentication")
    }
}

/// Verifies bearer tokens against one shared symmetric secret.
///
/// Verification is a pure function of the token and the secret: HS256 only,
/// no leeway on expiry, and a non-empty `uid` claim is required.
#[derive(Clone)]
pub struct TokenVerifier {
    inner: Arc<TokenVerifierInner>,
}

struct TokenVerifierInner {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Creates a verifier for the given secret.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        let inner = TokenVerifierInner {
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Verifies `token` and returns the actor it identifies.
    pub fn verify(&self, token: &str) -> Result<Actor, AuthError> {
        let inner = &self.inner;
        let claims = decode::<AuthClaims>(token, &inner.decoding_key, &inner.validation)
            .map_err(|error| {
                let error = AuthError::from(error);
                tracing::debug!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    reason = %error,
                    "token rejected",
                );
                error
            })?
            .claims;

        if claims.uid.is_empty() {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                "token rejected: empty subject",
            );
            return Err(AuthError::MissingSubject);
        }

        tracing::trace!(
            target: TRACING_TARGET_AUTHENTICATION,
            account_uid = %claims.uid,
            "token verified",
        );

        Ok(Actor::new(claims.uid))
    }
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}
