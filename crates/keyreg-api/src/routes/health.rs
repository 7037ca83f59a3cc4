//! # Health Probe Routes
//!
//! Unauthenticated Kubernetes-style probes. Liveness is unconditional;
//! readiness holds by construction because only an initialized registry
//! can enter [`AppState`], so it reports the cache size as a diagnostic.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

/// Build the health probe router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health/live", get(live))
        .route("/health/ready", get(ready))
}

/// GET /health/live — process is up.
async fn live() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /health/ready — registry is initialized and serving.
async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "state": state.registry.state_name(),
        "accepted": state.registry.accepted_snapshot().len(),
    }))
}
