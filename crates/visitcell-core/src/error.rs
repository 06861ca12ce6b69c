//! Shared error type across visitcell crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Path did not match any edge route.
    RouteNotFound,
    /// Path matched, method did not.
    MethodNotAllowed,
    /// Durable read or write did not complete.
    StorageFailure,
    /// Invalid input / malformed config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and metrics labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::RouteNotFound => "ROUTE_NOT_FOUND",
            ClientCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ClientCode::StorageFailure => "STORAGE_FAILURE",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, VisitCellError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum VisitCellError {
    #[error("route not found")]
    RouteNotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl VisitCellError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            VisitCellError::RouteNotFound => ClientCode::RouteNotFound,
            VisitCellError::MethodNotAllowed => ClientCode::MethodNotAllowed,
            VisitCellError::Storage(_) => ClientCode::StorageFailure,
            VisitCellError::BadRequest(_) => ClientCode::BadRequest,
            VisitCellError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            VisitCellError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Message placed in the `error` field of a failure envelope.
    ///
    /// Storage and internal causes stay in the logs; clients only see a fixed
    /// string per code.
    pub fn public_message(&self) -> &'static str {
        match self {
            VisitCellError::RouteNotFound => "Edge Route Not Found",
            VisitCellError::MethodNotAllowed => "Method not allowed or endpoint constraint failed",
            VisitCellError::Storage(_) => "Durable storage operation failed",
            VisitCellError::BadRequest(_) => "Bad request",
            VisitCellError::UnsupportedVersion => "Unsupported version",
            VisitCellError::Internal(_) => "Internal edge failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_messages_match_edge_contract() {
        assert_eq!(VisitCellError::RouteNotFound.public_message(), "Edge Route Not Found");
        assert_eq!(
            VisitCellError::MethodNotAllowed.public_message(),
            "Method not allowed or endpoint constraint failed"
        );
    }

    #[test]
    fn storage_cause_is_not_public() {
        let e = VisitCellError::Storage("sled: io error at /var/lib/x".into());
        assert_eq!(e.client_code().as_str(), "STORAGE_FAILURE");
        assert!(!e.public_message().contains("sled"));
        assert!(e.to_string().contains("sled"));
    }
}
