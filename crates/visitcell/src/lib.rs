//! Top-level facade crate for visitcell.
//!
//! Re-exports the core types, the gateway library, and the client so users
//! can depend on a single crate.

pub mod core {
    pub use visitcell_core::*;
}

pub mod gateway {
    pub use visitcell_gateway::*;
}

pub mod client {
    pub use visitcell_client::*;
}
