//! OpenAPI specification with a Scalar reference UI.
//!
//! The document is generated from the `aide` [`ApiRouter`] once, when the
//! router is finished, and served as JSON next to the UI.

use aide::axum::ApiRouter;
use aide::openapi::{Info, License, OpenApi};
use aide::scalar::Scalar;
use axum::routing::{Router, get};
use axum::{Extension, Json};
#[cfg(any(test, feature = "config"))]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Paths of the OpenAPI JSON document and the Scalar UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    /// Path which exposes the OpenAPI JSON specification.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "OPENAPI_JSON_PATH", default_value = "/api/openapi.json")
    )]
    pub open_api_json: String,

    /// Path which exposes the Scalar API reference UI.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "OPENAPI_SCALAR_PATH", default_value = "/api/scalar")
    )]
    pub scalar_ui: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/api/openapi.json".to_owned(),
            scalar_ui: "/api/scalar".to_owned(),
        }
    }
}

/// Extension trait for [`ApiRouter`] to serve its OpenAPI documentation.
pub trait RouterOpenApiExt<S> {
    /// Finishes the router, serving the document with the default API info.
    fn with_open_api(self, config: &OpenApiConfig) -> Router<S>;

    /// Finishes the router, serving the document with custom API info.
    fn with_open_api_info(self, config: &OpenApiConfig, info: Info) -> Router<S>;
}

impl<S> RouterOpenApiExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_open_api(self, config: &OpenApiConfig) -> Router<S> {
        let info = Info {
            title: "Decklog API".to_owned(),
            summary: Some("Match tracking for trading card game players".to_owned()),
            description: Some(
                "Decklog keeps event records, decks, deck codes and match reports. \
                Private records and their matches are visible to their owner only."
                    .to_owned(),
            ),
            license: Some(License {
                name: "MIT".to_owned(),
                identifier: Some("MIT".to_owned()),
                ..License::default()
            }),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            ..Info::default()
        };

        self.with_open_api_info(config, info)
    }

    fn with_open_api_info(self, config: &OpenApiConfig, info: Info) -> Router<S> {
        async fn serve_openapi(Extension(api): Extension<OpenApi>) -> Json<OpenApi> {
            Json(api)
        }

        let mut api = OpenApi {
            info,
            ..OpenApi::default()
        };

        let scalar = Scalar::new(&config.open_api_json);
        let router = self
            .route(&config.scalar_ui, scalar.axum_route())
            .route(&config.open_api_json, get(serve_openapi));

        router.finish_api(&mut api).layer(Extension(api))
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::Value;

    use super::*;
    use crate::handler::routes;
    use crate::handler::test::create_test_state;

    #[tokio::test]
    async fn document_lists_routes() -> anyhow::Result<()> {
        let app: Router = routes()
            .with_open_api(&OpenApiConfig::default())
            .with_state(create_test_state());
        let server = TestServer::new(app)?;

        let response = server.get("/api/openapi.json").await;
        response.assert_status_ok();

        let document: Value = response.json();
        assert_eq!(document["info"]["title"], "Decklog API");
        assert!(document["paths"]["/matches/{matchId}/"]["put"].is_object());
        assert!(document["paths"]["/records/{recordId}/matches/"]["get"].is_object());
        Ok(())
    }

    #[tokio::test]
    async fn scalar_ui_is_served() -> anyhow::Result<()> {
        let app: Router = routes()
            .with_open_api(&OpenApiConfig::default())
            .with_state(create_test_state());
        let server = TestServer::new(app)?;

        server.get("/api/scalar").await.assert_status_ok();
        Ok(())
    }
}
