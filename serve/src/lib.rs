//! HTTP server for the honeypot agent (axum).
//!
//! `POST /api/v1/engage` runs one judgement for a posted message and history, guarded by the
//! `X-API-KEY` header. `GET /health` reports the model and timeout in use.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`router`], [`AppState`].

mod app;
mod engage;
mod error;

use std::future::Future;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub use app::{router, AppState, HealthResponse, ENGAGE_PATH, HEALTH_PATH};
pub use engage::{authorize, EngageRequest, API_KEY_HEADER};
pub use error::{
    ApiError, INTERNAL_MESSAGE, INVALID_JSON_MESSAGE, MISSING_MESSAGE, UNAUTHORIZED_MESSAGE,
};

/// Serves on an existing listener until `shutdown` resolves. Used by tests (bind to
/// `127.0.0.1:0`, then pass the listener). In-flight requests complete before returning.
pub async fn run_serve_on_listener<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(
        model = %state.processor().model_name(),
        timeout_secs = ?state.processor().timeout().map(|d| d.as_secs()),
        "honeypot api listening on http://{}{}",
        addr,
        ENGAGE_PATH
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("honeypot api stopped");
    Ok(())
}

/// Binds `addr` (e.g. `0.0.0.0:3000`) and serves until Ctrl+C or SIGTERM.
pub async fn run_serve(
    addr: &str,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;
    run_serve_on_listener(listener, state, shutdown_signal()).await
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM; waiting for Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
