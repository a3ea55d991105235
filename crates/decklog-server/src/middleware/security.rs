//! Browser-facing protection for the decklog API.
//!
//! Callers authenticate with a bearer token in the `Authorization` header,
//! never with cookies, so CORS only has to admit that header and does not
//! share credentials unless told to. Every request body is a small JSON
//! document (a profile, a record, a deck or a match report), which keeps
//! the body limit low. Responses carry headers that forbid framing and
//! content sniffing and pin clients to HTTPS.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{self, HeaderName, HeaderValue};
#[cfg(any(test, feature = "config"))]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;

/// Largest accepted request body: 64 KiB.
///
/// The longest field of any request is a 1024 character memo.
pub const DEFAULT_MAX_BODY_SIZE: usize = 64 * 1024;

/// Local front-end dev servers admitted when no origin is configured.
const DEV_ORIGINS: [&str; 5] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Methods used by the decklog routes.
const API_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
];

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S> {
    /// Layers CORS, the body limit, compression and the response headers.
    fn with_security(self, cors: &CorsConfig, headers: &SecurityHeadersConfig) -> Self;

    /// Same as [`with_security`] with the defaults, which admit only the
    /// local dev origins.
    ///
    /// [`with_security`]: RouterSecurityExt::with_security
    fn with_default_security(self) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, cors: &CorsConfig, headers: &SecurityHeadersConfig) -> Self {
        let router = self
            .layer(DefaultBodyLimit::max(DEFAULT_MAX_BODY_SIZE))
            .layer(RequestBodyLimitLayer::new(DEFAULT_MAX_BODY_SIZE))
            .layer(CompressionLayer::new())
            .layer(cors.layer());

        headers
            .response_headers()
            .into_iter()
            .fold(router, |router, (name, value)| {
                router.layer(SetResponseHeaderLayer::overriding(name, value))
            })
    }

    fn with_default_security(self) -> Self {
        self.with_security(&CorsConfig::default(), &SecurityHeadersConfig::default())
    }
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// Origins of the front-ends allowed to call the API.
    ///
    /// Empty admits the local dev servers only.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// How long browsers may cache a preflight answer, in seconds.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,

    /// Whether browsers may send cookies along. Bearer tokens do not need it.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "CORS_ALLOW_CREDENTIALS", default_value = "false")
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            allow_credentials: false,
        }
    }
}

impl CorsConfig {
    /// Returns the preflight cache duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Returns the admitted origins.
    ///
    /// Configured origins that do not parse as header values are dropped.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.is_empty() {
            return DEV_ORIGINS.into_iter().map(HeaderValue::from_static).collect();
        }

        self.allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect()
    }

    fn layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(self.to_header_values())
            .allow_methods(API_METHODS)
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers([HeaderName::from_static("x-request-id")])
            .allow_credentials(self.allow_credentials)
            .max_age(self.max_age())
    }
}

/// Headers set on every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct SecurityHeadersConfig {
    /// `Strict-Transport-Security` max age in seconds.
    pub hsts_max_age_seconds: u64,
    /// Whether the HSTS policy covers subdomains.
    pub hsts_include_subdomains: bool,
    pub frame_options: FrameOptions,
    pub referrer_policy: ReferrerPolicy,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            hsts_max_age_seconds: 365 * 24 * 60 * 60,
            hsts_include_subdomains: true,
            frame_options: FrameOptions::Deny,
            referrer_policy: ReferrerPolicy::NoReferrer,
        }
    }
}

impl SecurityHeadersConfig {
    /// Returns the `Strict-Transport-Security` value.
    pub fn hsts_header_value(&self) -> String {
        let mut value = format!("max-age={}", self.hsts_max_age_seconds);
        if self.hsts_include_subdomains {
            value.push_str("; includeSubDomains");
        }
        value
    }

    fn response_headers(&self) -> Vec<(HeaderName, HeaderValue)> {
        let mut headers = vec![
            (
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static(self.frame_options.as_str()),
            ),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
            (
                header::REFERRER_POLICY,
                HeaderValue::from_static(self.referrer_policy.as_str()),
            ),
        ];

        // Digits and ASCII only, so this always parses.
        if let Ok(hsts) = HeaderValue::try_from(self.hsts_header_value()) {
            headers.push((header::STRICT_TRANSPORT_SECURITY, hsts));
        }

        headers
    }
}

/// `X-Frame-Options` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameOptions {
    Deny,
    SameOrigin,
}

impl FrameOptions {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deny => "DENY",
            Self::SameOrigin => "SAMEORIGIN",
        }
    }
}

/// `Referrer-Policy` values.
///
/// Record and match URLs carry ids of possibly private resources, so the
/// default sends no referrer at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferrerPolicy {
    NoReferrer,
    Origin,
    StrictOriginWhenCrossOrigin,
}

impl ReferrerPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoReferrer => "no-referrer",
            Self::Origin => "origin",
            Self::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum_test::TestServer;

    use super::*;

    fn create_test_server(cors: &CorsConfig) -> anyhow::Result<TestServer> {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .route("/echo", post(|body: String| async move { body }))
            .with_security(cors, &SecurityHeadersConfig::default());
        Ok(TestServer::new(app)?)
    }

    #[test]
    fn empty_origins_fall_back_to_localhost() {
        let origins = CorsConfig::default().to_header_values();
        assert_eq!(origins.len(), DEV_ORIGINS.len());

        let config = CorsConfig {
            allowed_origins: vec!["https://decklog.dev".to_owned(), "bad\norigin".to_owned()],
            ..CorsConfig::default()
        };
        assert_eq!(config.to_header_values(), ["https://decklog.dev"]);
    }

    #[test]
    fn hsts_value() {
        let mut headers = SecurityHeadersConfig::default();
        assert_eq!(headers.hsts_header_value(), "max-age=31536000; includeSubDomains");

        headers.hsts_include_subdomains = false;
        assert_eq!(headers.hsts_header_value(), "max-age=31536000");
    }

    #[tokio::test]
    async fn allowed_origin_is_echoed() -> anyhow::Result<()> {
        let config = CorsConfig {
            allowed_origins: vec!["https://decklog.dev".to_owned()],
            ..CorsConfig::default()
        };
        let server = create_test_server(&config)?;

        let response = server
            .get("/")
            .add_header(header::ORIGIN, HeaderValue::from_static("https://decklog.dev"))
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            "https://decklog.dev"
        );
        assert_eq!(response.header(header::X_CONTENT_TYPE_OPTIONS), "nosniff");
        assert_eq!(response.header(header::X_FRAME_OPTIONS), "DENY");
        assert_eq!(response.header(header::REFERRER_POLICY), "no-referrer");
        assert_eq!(
            response.header(header::STRICT_TRANSPORT_SECURITY),
            "max-age=31536000; includeSubDomains"
        );
        assert!(
            response
                .maybe_header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .is_none()
        );
        Ok(())
    }

    #[tokio::test]
    async fn unknown_origin_gets_no_cors_headers() -> anyhow::Result<()> {
        let server = create_test_server(&CorsConfig::default())?;

        let response = server
            .get("/")
            .add_header(header::ORIGIN, HeaderValue::from_static("https://evil.example"))
            .await;
        assert!(response.maybe_header(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server(&CorsConfig::default())?;

        server
            .post("/echo")
            .text("x".repeat(DEFAULT_MAX_BODY_SIZE + 1))
            .await
            .assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        server
            .post("/echo")
            .text("small")
            .await
            .assert_status_ok();
        Ok(())
    }
}
