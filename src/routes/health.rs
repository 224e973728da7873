use axum::{extract::State, http::StatusCode, response::IntoResponse};
use runhub_client::events::{self, EventFilter};

use super::AppState;

/// GET /health - liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /ready - readiness probe, checks the backend answers
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let filter = EventFilter {
        limit: Some(1),
        ..Default::default()
    };

    match events::list(&state.api, &filter).await {
        Ok(_) => (StatusCode::OK, "READY"),
        Err(e) => {
            tracing::error!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
        }
    }
}
