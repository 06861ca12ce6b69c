//! Axum router wiring.
//!
//! `GET /api/session` is the only edge route. Any other method on that path
//! (HEAD included, which axum would otherwise serve from the GET handler) is a
//! 405; any other path is a 404. Ops endpoints live outside `/api`.

use axum::{routing::get, Router};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            api::SESSION_PATH,
            get(api::session::get_session)
                .head(api::method_not_allowed)
                .fallback(api::method_not_allowed),
        )
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .fallback(api::route_not_found)
        .with_state(state)
}
