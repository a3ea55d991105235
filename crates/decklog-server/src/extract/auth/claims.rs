use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Claims consumed from a bearer token.
///
/// | Claim | Field | Description                        |
/// |-------|-------|------------------------------------|
/// | `uid` | `uid` | Subject the token was issued for   |
/// | `exp` | `exp` | Expiry as seconds since Unix epoch |
///
/// Other claims are ignored. A missing `uid` decodes as empty and is
/// rejected by the verifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject uid.
    #[serde(default)]
    pub uid: String,
    /// Expiration time (seconds since Unix epoch).
    pub exp: i64,
}

impl AuthClaims {
    /// Creates claims for `uid` expiring at `expires_at`.
    pub fn new(uid: impl Into<String>, expires_at: Timestamp) -> Self {
        Self {
            uid: uid.into(),
            exp: expires_at.as_second(),
        }
    }

    /// Returns the expiration time.
    #[must_use]
    pub fn expires_at(&self) -> Option<Timestamp> {
        Timestamp::from_second(self.exp).ok()
    }
}
