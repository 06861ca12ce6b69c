use visitcell_core::{ApiResponse, SessionData, SESSION_PATH};

use crate::error::{ClientError, FALLBACK_REJECTION};

#[derive(Debug, Clone)]
pub struct SessionClient {
    http: reqwest::Client,
    base_url: String,
}

impl SessionClient {
    /// `base_url` is scheme plus authority, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SESSION_PATH)
    }

    /// One `GET /api/session`. Every visit is counted server-side.
    pub async fn fetch_session(&self) -> Result<SessionData, ClientError> {
        let url = self.endpoint();
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "edge rejected request");
            return Err(ClientError::Transport(format!(
                "Edge rejected request with HTTP status {}",
                status.as_u16()
            )));
        }

        let body: ApiResponse<SessionData> = res
            .json()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        interpret(body)
    }
}

/// Turn a decoded 2xx envelope into data or a rejection.
pub fn interpret(body: ApiResponse<SessionData>) -> Result<SessionData, ClientError> {
    match body {
        ApiResponse {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        ApiResponse { error, .. } => Err(ClientError::Rejected(
            error.unwrap_or_else(|| FALLBACK_REJECTION.to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visitcell_core::SessionKey;

    fn data() -> SessionData {
        SessionData {
            session_id: SessionKey::derive("s"),
            visit_count: 9,
        }
    }

    #[test]
    fn success_with_data() {
        assert_eq!(interpret(ApiResponse::ok(data())), Ok(data()));
    }

    #[test]
    fn failure_carries_edge_message() {
        let res = interpret(ApiResponse::fail("Edge Route Not Found"));
        assert_eq!(res, Err(ClientError::Rejected("Edge Route Not Found".into())));
    }

    #[test]
    fn missing_error_and_missing_data_fall_back() {
        let no_error = ApiResponse {
            success: false,
            data: None,
            error: None,
        };
        let no_data = ApiResponse {
            success: true,
            data: None,
            error: None,
        };
        for body in [no_error, no_data] {
            assert_eq!(
                interpret(body),
                Err(ClientError::Rejected(FALLBACK_REJECTION.into()))
            );
        }
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        assert_eq!(
            SessionClient::new("http://edge.local/").endpoint(),
            "http://edge.local/api/session"
        );
    }
}
