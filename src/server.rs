//! HTTP server wiring: layers, bind, graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::{Config, ServerConfig};
use crate::error::{Error, Result};
use crate::store::TaskStore;

/// Router with tracing and, when enabled, permissive CORS.
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    let router = api::router(state).layer(TraceLayer::new_for_http());
    if server.cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    }
}

/// Binds `server.host:server.port` and serves until Ctrl-C or SIGTERM.
pub async fn serve(config: &Config) -> Result<()> {
    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|err| Error::OperationFailed(format!("failed to bind {address}: {err}")))?;

    let state = AppState::new(Arc::new(TaskStore::new()), config.dashboard);
    serve_with_listener(listener, app(state, &config.server), shutdown_signal()).await?;
    tracing::info!("server shutdown complete");
    Ok(())
}

/// Serves `app` on an already bound listener until `shutdown` resolves.
pub async fn serve_with_listener<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local: SocketAddr = listener.local_addr()?;
    tracing::info!(address = %local, "study organizer listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
