//! Wire envelope for the edge API.
//!
//! Every response body, success or failure, is an `ApiResponse`:
//! - success: `{"success":true,"data":{...}}`
//! - failure: `{"success":false,"error":"..."}`
//!
//! Absent fields are omitted rather than serialized as `null`.

pub mod envelope;

pub use envelope::{ApiResponse, SessionData};

/// The one edge route.
pub const SESSION_PATH: &str = "/api/session";
