use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use visitcell_core::{ApiResponse, SessionData};

use super::{ApiFailure, SESSION_PATH};
use crate::app_state::AppState;

/// `GET /api/session`: count this visit against the session key.
pub async fn get_session(State(state): State<AppState>) -> Result<Response, ApiFailure> {
    let key = state.session_key().clone();
    let metrics = state.metrics();

    let visit_count = match state.store().increment_and_get(&key).await {
        Ok(n) => n,
        Err(e) => {
            tracing::error!(%key, code = e.client_code().as_str(), error = %e, "visit count increment failed");
            let failure = ApiFailure(e);
            metrics
                .http_requests
                .inc(&[("route", SESSION_PATH), ("status", failure.status().as_str())]);
            return Err(failure);
        }
    };

    tracing::debug!(%key, visit_count, "visit counted");
    metrics
        .http_requests
        .inc(&[("route", SESSION_PATH), ("status", StatusCode::OK.as_str())]);

    let body = ApiResponse::ok(SessionData {
        session_id: key,
        visit_count,
    });
    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-store")],
        Json(body),
    )
        .into_response())
}
