//! HTTP listener that accepts Alertmanager webhooks.
//!
//! Every path is routed to the same handler, so Alertmanager can be pointed at
//! the bare host or at any sub-path.

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::core::relay::RelayEngine;
use crate::core::Pipeline;
use crate::utils::error::{AdapterError, Result};

pub const SUCCESS_BODY: &str = "Alert forwarded successfully";

impl IntoResponse for AdapterError {
    fn into_response(self) -> Response {
        match &self {
            AdapterError::InvalidPayload { message } => {
                tracing::warn!("Error decoding payload: {}", message)
            }
            AdapterError::MethodNotAllowed { method } => {
                tracing::debug!("Rejected {} request", method)
            }
            other => tracing::error!("Alert relay failed: {}", other),
        }

        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [(header::X_CONTENT_TYPE_OPTIONS, "nosniff")],
            format!("{}\n", self.public_message()),
        )
            .into_response()
    }
}

/// Build the router around a shared relay engine.
pub fn router<P: Pipeline + 'static>(engine: Arc<RelayEngine<P>>) -> Router {
    Router::new()
        .route("/", any(receive_alert::<P>))
        .fallback(receive_alert::<P>)
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

async fn receive_alert<P: Pipeline + 'static>(
    State(engine): State<Arc<RelayEngine<P>>>,
    method: Method,
    body: Bytes,
) -> std::result::Result<&'static str, AdapterError> {
    if method != Method::POST {
        return Err(AdapterError::MethodNotAllowed {
            method: method.to_string(),
        });
    }

    engine.run(&body).await?;
    Ok(SUCCESS_BODY)
}

/// Serve until Ctrl-C or SIGTERM.
pub async fn serve<P: Pipeline + 'static>(
    listener: TcpListener,
    engine: Arc<RelayEngine<P>>,
) -> Result<()> {
    serve_with_shutdown(listener, engine, shutdown_signal()).await
}

pub async fn serve_with_shutdown<P, F>(
    listener: TcpListener,
    engine: Arc<RelayEngine<P>>,
    signal: F,
) -> Result<()>
where
    P: Pipeline + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("Google Chat Adapter listening on {}", addr);

    axum::serve(listener, router(engine))
        .with_graceful_shutdown(signal)
        .await?;

    tracing::info!("Google Chat Adapter shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
