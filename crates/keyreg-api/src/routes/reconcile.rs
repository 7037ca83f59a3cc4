//! # Reconciliation Trigger Route
//!
//! On-demand reconciliation for operators and upstream webhooks. The
//! handler is a thin shim: single-flight exclusion, phase ordering, and
//! failure isolation all live in the engine.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use keyreg_sync::ReconcileReport;

use crate::error::AppError;
use crate::state::AppState;

/// Build the reconciliation router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/reconcile", post(trigger_reconcile))
}

/// POST /v1/reconcile — run one reconciliation cycle now.
///
/// - `200` with the settled cycle report.
/// - `409` if a cycle is already in flight; the caller retries later.
/// - `502` if the key fetch failed; nothing was mutated.
async fn trigger_reconcile(
    State(state): State<AppState>,
) -> Result<Json<ReconcileReport>, AppError> {
    let report = state.registry.reconcile().await?;
    Ok(Json(report))
}
