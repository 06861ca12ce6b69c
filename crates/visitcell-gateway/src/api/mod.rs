//! Edge API (`/api/*`).
//!
//! One known route, `GET /api/session`. Everything else under or outside the
//! prefix gets a structured failure envelope rather than an empty body.

pub mod error;
pub mod session;

use axum::{extract::State, http::Uri};

use visitcell_core::VisitCellError;

use crate::app_state::AppState;

pub use error::ApiFailure;

pub use visitcell_core::SESSION_PATH;

/// Known path, wrong method.
pub async fn method_not_allowed(State(state): State<AppState>) -> ApiFailure {
    let failure = ApiFailure(VisitCellError::MethodNotAllowed);
    state
        .metrics()
        .http_requests
        .inc(&[("route", SESSION_PATH), ("status", failure.status().as_str())]);
    failure
}

/// No route matched.
pub async fn route_not_found(State(state): State<AppState>, uri: Uri) -> ApiFailure {
    tracing::debug!(path = %uri.path(), "edge route not found");
    let failure = ApiFailure(VisitCellError::RouteNotFound);
    state
        .metrics()
        .http_requests
        .inc(&[("route", "unmatched"), ("status", failure.status().as_str())]);
    failure
}
