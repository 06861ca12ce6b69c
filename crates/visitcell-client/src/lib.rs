//! Typed client for the visitcell edge.
//!
//! Mirrors what the browser UI does with `GET /api/session`:
//! - `SessionClient`: one HTTP call, envelope interpretation
//! - `ConnectionState`: idle / connecting / connected / error
//! - `DiagnosticSlot`: live-session handle set on connect, cleared on disconnect
//! - `Probe`: drives the three together

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod client;
pub mod diagnostics;
pub mod error;
pub mod probe;
pub mod state;

pub use client::SessionClient;
pub use diagnostics::DiagnosticSlot;
pub use error::{ClientError, InvalidTransition};
pub use probe::{Probe, CANCELLED};
pub use state::ConnectionState;
