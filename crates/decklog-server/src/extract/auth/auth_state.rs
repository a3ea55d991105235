//! Authenticated caller extractor.
//!
//! [`AuthState`] verifies the bearer credential while the request parts are
//! extracted, so a caller that fails authentication is rejected before any
//! path, query or body extractor of the handler runs.
//!
//! ```rust,ignore
//! use decklog_server::extract::AuthState;
//!
//! // The route requires a verified caller.
//! async fn create_deck(auth_state: AuthState) -> Result<impl IntoResponse> {
//!     Ok(auth_state.uid().to_owned())
//! }
//!
//! // Anonymous callers are let through as `None`; a credential that is
//! // present but does not verify is still rejected.
//! async fn read_record(auth_state: Option<AuthState>) -> Result<impl IntoResponse> {
//!     Ok(auth_state.is_some().to_string())
//! }
//! ```

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;

use super::{Actor, Credential};
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, Result};
use crate::policy::{AccessContext, Authenticate, Pipeline};
use crate::service::{AuthError, TokenVerifier};

/// The verified caller of a request.
///
/// Dereferences to the [`Actor`] built from the token subject. The actor is
/// cached in the request extensions once verified.
#[must_use]
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct AuthState(Actor);

impl AuthState {
    /// Consumes the state and returns the verified actor.
    #[inline]
    pub fn into_actor(self) -> Actor {
        self.0
    }

    async fn from_parts<S>(parts: &mut Parts, state: &S, presence: Presence) -> Result<Option<Self>>
    where
        S: Sync + Send,
        TokenVerifier: FromRef<S>,
    {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(Some(auth_state.clone()));
        }

        let credential = match Credential::from_request_parts(parts, state).await {
            Ok(credential) => credential,
            Err(infallible) => match infallible {},
        };

        let verifier = TokenVerifier::from_ref(state);
        let authenticate = match presence {
            Presence::Required => Authenticate::required(&verifier, &credential),
            Presence::Optional => Authenticate::optional(&verifier, &credential),
        };

        let actor = Pipeline::new()
            .then(authenticate)
            .run(AccessContext::anonymous())
            .await?
            .into_actor();
        if actor.is_anonymous() {
            return Ok(None);
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            account_uid = %actor.uid(),
            "caller authenticated",
        );

        let auth_state = Self(actor);
        parts.extensions.insert(auth_state.clone());
        Ok(Some(auth_state))
    }
}

#[derive(Debug, Clone, Copy)]
enum Presence {
    Required,
    Optional,
}

impl From<AuthState> for Actor {
    #[inline]
    fn from(auth_state: AuthState) -> Self {
        auth_state.0
    }
}

impl From<Option<AuthState>> for Actor {
    #[inline]
    fn from(auth_state: Option<AuthState>) -> Self {
        auth_state.map(AuthState::into_actor).unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send,
    TokenVerifier: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Self::from_parts(parts, state, Presence::Required).await? {
            Some(auth_state) => Ok(auth_state),
            // A required credential never verifies to the anonymous actor.
            None => Err(AuthError::MissingToken.into()),
        }
    }
}

impl<S> OptionalFromRequestParts<S> for AuthState
where
    S: Sync + Send,
    TokenVerifier: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Self::from_parts(parts, state, Presence::Optional).await
    }
}

impl aide::OperationInput for AuthState {}

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use axum::http::header::AUTHORIZATION;

    use super::*;
    use crate::handler::ErrorKind;
    use crate::handler::test::{TEST_SECRET, bearer};

    fn parts(header: Option<&str>) -> anyhow::Result<Parts> {
        let mut builder = Request::builder().uri("/");
        if let Some(header) = header {
            builder = builder.header(AUTHORIZATION, header);
        }

        Ok(builder.body(())?.into_parts().0)
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(TEST_SECRET)
    }

    async fn required(parts: &mut Parts) -> Result<AuthState> {
        <AuthState as FromRequestParts<TokenVerifier>>::from_request_parts(parts, &verifier())
            .await
    }

    async fn optional(parts: &mut Parts) -> Result<Option<AuthState>> {
        <AuthState as OptionalFromRequestParts<TokenVerifier>>::from_request_parts(
            parts,
            &verifier(),
        )
        .await
    }

    #[tokio::test]
    async fn required_rejects_absent_credential() -> anyhow::Result<()> {
        let error = required(&mut parts(None)?).await.err();
        assert_eq!(error.map(|e| e.kind()), Some(ErrorKind::Unauthorized));
        Ok(())
    }

    #[tokio::test]
    async fn optional_lets_anonymous_through() -> anyhow::Result<()> {
        assert!(optional(&mut parts(None)?).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn optional_still_rejects_bad_credential() -> anyhow::Result<()> {
        let error = optional(&mut parts(Some("Bearer not-a-token"))?).await.err();
        assert_eq!(error.map(|e| e.kind()), Some(ErrorKind::Unauthorized));

        let error = optional(&mut parts(Some("Basic dXNlcg=="))?).await.err();
        assert_eq!(error.map(|e| e.kind()), Some(ErrorKind::Unauthorized));
        Ok(())
    }

    #[tokio::test]
    async fn verified_actor_is_cached() -> anyhow::Result<()> {
        let (_, value) = bearer("u1")?;
        let mut parts = parts(Some(value.to_str()?))?;

        let auth_state = required(&mut parts).await?;
        assert_eq!(auth_state.uid(), "u1");
        assert_eq!(parts.extensions.get::<AuthState>(), Some(&auth_state));

        let again = optional(&mut parts).await?;
        assert_eq!(again.map(Actor::from), Some(Actor::new("u1")));
        Ok(())
    }
}
