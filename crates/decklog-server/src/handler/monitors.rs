//! Liveness handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use decklog_store::MemoryStore;
use jiff::Timestamp;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::MonitorStatus;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "decklog_server::handler::monitors";

/// Reports whether the backing store still serves requests.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(store): State<MemoryStore>,
) -> Result<(StatusCode, Json<MonitorStatus>)> {
    let is_healthy = !store.is_closed();
    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy,
        status_code = status_code.as_u16(),
        "health status checked",
    );

    let response = MonitorStatus {
        is_healthy,
        checked_at: Timestamp::now(),
    };

    Ok((status_code, Json(response)))
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Health status")
        .description("Returns 200 while the store serves requests and 503 once it is closed.")
        .response::<200, Json<MonitorStatus>>()
        .response::<503, Json<MonitorStatus>>()
}

/// Returns routes for health monitoring.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health/", get_with(health_status, health_status_docs))
        .with_path_items(|item| item.tag("Monitors"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use jiff::{SignedDuration, Timestamp};

    use crate::handler::response::MonitorStatus;
    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn open_store_is_healthy() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server.get("/health/").await;
        response.assert_status_ok();

        let status: MonitorStatus = response.json();
        assert!(status.is_healthy);
        assert!(Timestamp::now().duration_since(status.checked_at) < SignedDuration::from_secs(60));
        Ok(())
    }

    #[tokio::test]
    async fn closed_store_is_unavailable() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        state.store.close();

        let response = server.get("/health/").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert!(!response.json::<MonitorStatus>().is_healthy);
        Ok(())
    }
}
