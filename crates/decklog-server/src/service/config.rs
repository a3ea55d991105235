use std::fmt;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Minimum accepted length of the signing secret, in bytes.
pub const MIN_AUTH_SECRET_LEN: usize = 32;

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Shared secret used to verify HS256 bearer tokens.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "AUTH_SECRET", hide_env_values = true)
    )]
    pub auth_secret: String,
}

impl ServiceConfig {
    /// Creates a configuration with the given signing secret.
    pub fn new(auth_secret: impl Into<String>) -> Self {
        Self {
            auth_secret: auth_secret.into(),
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.auth_secret.is_empty() {
            return Err(Error::config("auth secret is not set"));
        }

        if self.auth_secret.len() < MIN_AUTH_SECRET_LEN {
            return Err(Error::auth(format!(
                "auth secret must be at least {MIN_AUTH_SECRET_LEN} bytes long"
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("auth_secret", &"<redacted>")
            .finish()
    }
}
