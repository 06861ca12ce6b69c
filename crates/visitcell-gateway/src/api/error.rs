use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use visitcell_core::error::{ClientCode, VisitCellError};
use visitcell_core::ApiResponse;

/// HTTP face of [`VisitCellError`]: status code plus a `{success:false}` envelope.
#[derive(Debug)]
pub struct ApiFailure(pub VisitCellError);

impl ApiFailure {
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::RouteNotFound => StatusCode::NOT_FOUND,
            ClientCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::StorageFailure | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<VisitCellError> for ApiFailure {
    fn from(e: VisitCellError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body: ApiResponse<()> = ApiResponse::fail(self.0.public_message());
        (
            self.status(),
            [(header::CACHE_CONTROL, "no-store")],
            Json(body),
        )
            .into_response()
    }
}
