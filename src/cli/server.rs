//! HTTP server mode: a bearer-protected demo API

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::BearerConfig;
use crate::error::{Error, Result};
use crate::middleware::{self, Authenticated};
use crate::static_tokens::{StaticTokens, Subject, TokenInfo};
use crate::strategy::BearerStrategy;

/// Build the application router
///
/// `/health` is public; `/me` (GET or POST, so form-body tokens work)
/// requires a bearer token.
pub fn router(strategy: Arc<BearerStrategy<StaticTokens>>) -> Router {
    let protected = middleware::protect(Router::new().route("/me", get(me).post(me)), strategy);

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn serve(config: BearerConfig, port: u16) -> Result<()> {
    let strategy = Arc::new(config.strategy());
    tracing::info!(
        realm = strategy.realm(),
        tokens = strategy.verifier().len(),
        "bearer strategy configured"
    );

    let app = router(strategy);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::server(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::server(e.to_string()))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Identity of the caller
async fn me(Extension(auth): Extension<Authenticated<Subject, TokenInfo>>) -> impl IntoResponse {
    let scope = auth.info.map(|info| info.scope).unwrap_or_default();
    Json(json!({
        "subject": auth.principal.id,
        "scope": scope
    }))
}
