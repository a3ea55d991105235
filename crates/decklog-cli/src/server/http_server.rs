//! HTTP server startup with graceful shutdown.

use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::lifecycle::serve_with_shutdown;
use super::shutdown::shutdown_signal;
use super::{ServerError, ServerResult};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Validates the configuration, binds the address and serves until
/// SIGTERM or Ctrl+C.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    if let Err(err) = server_config.validate() {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            error = %err,
            "invalid server configuration",
        );
        return Err(ServerError::invalid_config(&err));
    }

    let server_addr = server_config.server_addr();
    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %err,
            "failed to bind to address",
        );
        ServerError::bind_error(server_addr, err)
    })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "server is listening for connections",
    );

    let grace = server_config.shutdown_timeout();
    serve_with_shutdown(&server_config, || {
        serve_listener(listener, app, shutdown_signal(), grace)
    })
    .await
}

/// Serves `app` on `listener` until `signal` resolves.
///
/// After the signal no new connections are accepted. In-flight requests get
/// `grace` to finish; connections still open afterwards are dropped.
pub(crate) async fn serve_listener<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    grace: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signaled_tx, signaled_rx) = oneshot::channel();
    let signal = async move {
        signal.await;
        let _ = signaled_tx.send(());
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .into_future();
    tokio::pin!(server);

    let deadline = async move {
        match signaled_rx.await {
            Ok(()) => tokio::time::sleep(grace).await,
            Err(_) => std::future::pending().await,
        }
    };

    tokio::select! {
        result = &mut server => result,
        () = deadline => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                grace_secs = grace.as_secs(),
                "shutdown timeout elapsed, dropping open connections",
            );
            Ok(())
        }
    }
}
