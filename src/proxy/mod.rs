//! Compatibility proxy.
//!
//! Serves the published target directory to the legacy browser client,
//! which POSTs JSON and expects the artifact wrapped as
//! `{"response": "..."}`. The proxy holds no state beyond its
//! configuration; every request performs at most one upstream GET.

mod route;
mod upstream;

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::core::config::ProxyConfig;
use crate::error::{ProxyError, Result};

pub use route::{check_content_type, check_method, Route, SecretRequest};
pub use upstream::Upstream;

/// Largest secret request body read from the client.
const MAX_BODY_BYTES: usize = 1 << 20;

/// Successful reply body.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    pub response: String,
}

/// State shared by all requests.
#[derive(Debug)]
pub struct ProxyState {
    upstream: Upstream,
}

/// Build the proxy router.
pub fn router(upstream: Upstream) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(Arc::new(ProxyState { upstream }))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the address cannot
/// be bound. Per-request failures never end the server.
pub async fn serve(config: ProxyConfig) -> Result<()> {
    let upstream = Upstream::new(&config)?;
    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    info!(listen = %config.listen, target = %upstream.base(), "proxy listening");

    axum::serve(listener, router(upstream))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn dispatch(
    State(state): State<Arc<ProxyState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> Response {
    match handle(&state, &method, &uri, &headers, body).await {
        Ok(envelope) => Json(envelope).into_response(),
        Err(e) => {
            warn!(
                %method,
                path = uri.path(),
                status = e.status().as_u16(),
                error = %e,
                "request failed"
            );
            e.into_response()
        }
    }
}

async fn handle(
    state: &ProxyState,
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Body,
) -> std::result::Result<Envelope, ProxyError> {
    let route = Route::from_path(uri.path()).ok_or(ProxyError::NotFound)?;
    check_method(method)?;
    check_content_type(headers)?;

    // the index request body is never read
    let location = match route {
        Route::Index => route.location(b"")?,
        Route::Secret => {
            let body = axum::body::to_bytes(body, MAX_BODY_BYTES)
                .await
                .map_err(|e| {
                    ProxyError::InvalidBody(format!("failed to read request body: {}", e))
                })?;
            route.location(&body)?
        }
    };
    let response = state.upstream.fetch(&location).await?;
    Ok(Envelope { response })
}

impl ProxyError {
    /// HTTP status reported to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadContentType(_) | Self::InvalidBody(_) | Self::Request(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            format!("{}\n", self),
        )
            .into_response()
    }
}
