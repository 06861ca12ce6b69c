use thiserror::Error;

/// Shown when the edge says `success:false` without an `error`.
pub const FALLBACK_REJECTION: &str = "Data constraint failure enforced by Edge";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Network failure, undecodable body, or non-2xx status.
    #[error("{0}")]
    Transport(String),
    /// The edge answered with a failure envelope.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid connection transition: {event} while {from}")]
pub struct InvalidTransition {
    pub from: &'static str,
    pub event: &'static str,
}
