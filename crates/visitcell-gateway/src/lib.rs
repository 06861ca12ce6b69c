//! visitcell gateway library entry.
//!
//! This crate wires the edge router, the per-key counter store, config, and
//! ops endpoints into one service. It is consumed by the binary (`main.rs`)
//! and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
