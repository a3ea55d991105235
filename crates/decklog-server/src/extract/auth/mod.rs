//! Caller identity: the raw bearer [`Credential`], the decoded
//! [`AuthClaims`], the verified [`Actor`] and the [`AuthState`] extractor
//! that produces it.

mod actor;
mod auth_state;
mod claims;
mod credential;

pub use self::actor::Actor;
pub use self::auth_state::AuthState;
pub use self::claims::AuthClaims;
pub use self::credential::Credential;
