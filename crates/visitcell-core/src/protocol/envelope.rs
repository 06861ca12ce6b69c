use serde::{Deserialize, Serialize};

use crate::session::SessionKey;

/// Generic response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Payload of `GET /api/session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub session_id: SessionKey,
    pub visit_count: u64,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let body = ApiResponse::ok(SessionData {
            session_id: SessionKey::derive("global-demo-session"),
            visit_count: 3,
        });
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(
            v,
            json!({
                "success": true,
                "data": { "sessionId": "e53f626fa705e33e", "visitCount": 3 }
            })
        );
    }

    #[test]
    fn failure_envelope_omits_data() {
        let body: ApiResponse<SessionData> = ApiResponse::fail("Edge Route Not Found");
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v, json!({ "success": false, "error": "Edge Route Not Found" }));
    }

    #[test]
    fn parses_session_payload() {
        let raw = r#"{"success":true,"data":{"sessionId":"e53f626fa705e33e","visitCount":2}}"#;
        let body: ApiResponse<SessionData> = serde_json::from_str(raw).unwrap();
        assert!(body.error.is_none());
        assert_eq!(body.data.unwrap().visit_count, 2);
    }

    #[test]
    fn parses_failure_without_error_field() {
        let body: ApiResponse<SessionData> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!body.success);
        assert!(body.data.is_none());
        assert!(body.error.is_none());
    }
}
