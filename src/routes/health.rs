use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct LivenessResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    version: &'static str,
    database: DatabaseHealth,
}

#[derive(Serialize)]
struct DatabaseHealth {
    connected: bool,
    latency_ms: u64,
}

/// `GET /health`
pub fn root_router() -> Router<AppState> {
    Router::new().route("/health", get(liveness))
}

/// `GET /api/v1/health`
pub fn api_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn liveness() -> impl IntoResponse {
    Json(LivenessResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Pings the database and reports round-trip latency; 503 when unreachable.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let connected = match state.db.ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "database ping failed");
            false
        }
    };
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let status = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            version: env!("CARGO_PKG_VERSION"),
            database: DatabaseHealth {
                connected,
                latency_ms,
            },
        }),
    )
}
