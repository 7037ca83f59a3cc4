//! # keyreg-api — Axum Service Layer
//!
//! HTTP surface over the reconciliation engine, built on Axum/Tower/Tokio.
//!
//! ## Routes
//!
//! - `POST /v1/reconcile` — run one cycle now; `409` while one is in
//!   flight, `502` on fetch failure.
//! - `GET /v1/accepted` — copied snapshot of the accepted set.
//! - `GET /health/live`, `GET /health/ready` — unauthenticated probes.
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers — delegates to `keyreg-sync`.
//! - All errors map to structured HTTP responses via [`AppError`].

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;

/// Assemble the full application router over the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::reconcile::router())
        .merge(routes::accepted::router())
        .merge(routes::health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
