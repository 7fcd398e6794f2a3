use crate::expfmt;
use crate::logging;
use crate::state::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

/// Build the HTTP surface: `GET /metrics`, `GET /health`, 404 for
/// everything else (other methods included).
pub fn build_http_app(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics).fallback(not_found))
        .route("/health", get(health).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(logging::request_logging))
}

/// One synchronous collection pass on the request task; partial provider
/// failure is already absorbed by the registry and never reaches the
/// client.
async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.registry.collect();
    let body = expfmt::encode(&snapshot);
    ([(header::CONTENT_TYPE, expfmt::CONTENT_TYPE)], body)
}

/// Liveness check for the serving process, independent of provider
/// health.
async fn health() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "ok")
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
