//! HTTP service exposing the generate operation.
//!
//! - `POST /configure` - generate a chart from the JSON body, echo the body back
//! - `GET /health` - liveness probe

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::adapters::{FilesystemChartSink, YamlManifestSerializer};
use crate::app::AppContext;
use crate::app::commands::generate;
use crate::app::config::ServiceConfig;
use crate::domain::{AppError, CancelFlag, Mapping};

/// Shared state for request handlers.
#[derive(Clone)]
pub struct ServerState {
    ctx: Arc<AppContext<YamlManifestSerializer, FilesystemChartSink>>,
    // Requests share one chart directory; writes must not interleave
    write_lock: Arc<Mutex<()>>,
    timeout: Duration,
}

impl ServerState {
    pub fn new(config: &ServiceConfig) -> Self {
        let sink = FilesystemChartSink::new(config.output.dir.clone());
        Self {
            ctx: Arc::new(AppContext::new(YamlManifestSerializer, sink)),
            write_lock: Arc::new(Mutex::new(())),
            timeout: config.request_timeout(),
        }
    }
}

/// Build the service router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/configure", post(configure))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind the configured address and serve until interrupted.
pub async fn serve(config: &ServiceConfig) -> Result<(), AppError> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    serve_with_listener(listener, config).await
}

/// Serve on an already bound listener until interrupted.
pub async fn serve_with_listener(
    listener: TcpListener,
    config: &ServiceConfig,
) -> Result<(), AppError> {
    let addr = listener.local_addr()?;
    info!(%addr, output = %config.output.dir.display(), "helmgen listening");

    axum::serve(listener, router(ServerState::new(config)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn configure(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<Mapping>, AppError> {
    let cancel = CancelFlag::new();
    let mut worker = {
        let state = state.clone();
        let cancel = cancel.clone();
        tokio::task::spawn_blocking(move || {
            let _guard = state.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
            generate::execute(state.ctx.as_ref(), &body, &cancel)
        })
    };

    let joined = match tokio::time::timeout(state.timeout, &mut worker).await {
        Ok(joined) => joined,
        Err(_) if cancel.cancel() => {
            warn!(timeout_secs = state.timeout.as_secs(), "Configure request timed out");
            return Err(AppError::Cancelled);
        }
        Err(_) => {
            info!(
                timeout_secs = state.timeout.as_secs(),
                "Configure request timed out while writing; waiting for the chart to finish"
            );
            worker.await
        }
    };

    let outcome =
        joined.map_err(|e| AppError::Internal(format!("generate worker failed: {e}")))??;
    info!(files = outcome.report.written.len(), "Served configure request");
    Ok(Json(outcome.config))
}

/// HTTP status for an error surfaced at the request boundary.
pub fn status_for(err: &AppError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else if matches!(err, AppError::Cancelled) {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            error!(kind = self.kind(), error = %self, "Configure request failed");
        } else {
            warn!(kind = self.kind(), error = %self, "Rejected configure request");
        }

        let body = json!({ "error": { "kind": self.kind(), "message": self.to_string() } });
        (status, Json(body)).into_response()
    }
}
