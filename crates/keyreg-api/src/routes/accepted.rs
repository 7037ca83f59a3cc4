//! # Accepted-Set Snapshot Route
//!
//! Read-only view of the identifiers currently tracked as accepted.
//! Always a copied snapshot — the response never reflects a cycle in
//! mid-mutation.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use keyreg_core::KeyId;

use crate::state::AppState;

/// Build the accepted-set router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/accepted", get(list_accepted))
}

/// The accepted-set snapshot.
#[derive(Debug, Serialize, Deserialize)]
pub struct AcceptedResponse {
    /// Number of accepted identifiers.
    pub count: usize,
    /// Canonical identifiers, in sorted order.
    pub identifiers: Vec<KeyId>,
}

/// GET /v1/accepted — copied snapshot of the accepted set.
async fn list_accepted(State(state): State<AppState>) -> Json<AcceptedResponse> {
    let snapshot = state.registry.accepted_snapshot();
    Json(AcceptedResponse {
        count: snapshot.len(),
        identifiers: snapshot.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::state_with_keys;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_snapshot_is_empty_before_first_cycle() {
        let app = router().with_state(state_with_keys(&[("a", 101)]));
        let req = Request::builder()
            .uri("/v1/accepted")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: AcceptedResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.count, 0);
        assert!(body.identifiers.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_reflects_settled_cycle() {
        let state = state_with_keys(&[("a", 101), ("b", 103)]);
        state.registry.reconcile().await.unwrap();

        let app = router().with_state(state);
        let req = Request::builder()
            .uri("/v1/accepted")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: AcceptedResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.count, 2);
        assert_eq!(body.identifiers.len(), 2);
        // Sorted, canonical form.
        assert!(body.identifiers[0] < body.identifiers[1]);
        assert!(body.identifiers[0].to_string().starts_with("0x"));
    }
}
