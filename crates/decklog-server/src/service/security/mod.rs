//! Bearer token verification.

mod token_verifier;

pub use self::token_verifier::{AuthError, TokenVerifier};
