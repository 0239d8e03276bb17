//! Liveness endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::server::AppState;

/// Body of a plain (non-upgrade) `GET /`.
pub const BANNER: &str = "Pokemon stat relay is running.";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub request_types: Vec<&'static str>,
    pub active_connections: usize,
}

/// `GET /health`
pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        request_types: state.router.request_types(),
        active_connections: state.connections.active_count(),
    })
}
