//! visitcell core: session key derivation, the JSON envelope, and error types.
//!
//! This crate defines the contracts shared by the gateway, the client, and
//! tests. It carries no transport or runtime dependencies so both sides of
//! the wire can reuse it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `VisitCellError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod session;

/// Shared result type.
pub use error::{Result, VisitCellError};
pub use protocol::{ApiResponse, SessionData, SESSION_PATH};
pub use session::{SessionKey, DEFAULT_SEED};
