//! Connection state machine.
//!
//! ```text
//! Idle --submit--> Connecting --succeed--> Connected --disconnect--> Idle
//!                      |  ^
//!                    fail  submit (retry)
//!                      v  |
//!                     Error
//! ```
//!
//! Any other transition is refused and leaves the state untouched.

use visitcell_core::SessionData;

use crate::error::InvalidTransition;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Idle,
    Connecting,
    Connected(SessionData),
    Error(String),
}

impl ConnectionState {
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionState::Idle => "idle",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected(_) => "connected",
            ConnectionState::Error(_) => "error",
        }
    }

    pub fn submit(&mut self) -> Result<(), InvalidTransition> {
        match self {
            ConnectionState::Idle | ConnectionState::Error(_) => {
                *self = ConnectionState::Connecting;
                Ok(())
            }
            _ => Err(self.refuse("submit")),
        }
    }

    pub fn succeed(&mut self, data: SessionData) -> Result<(), InvalidTransition> {
        match self {
            ConnectionState::Connecting => {
                *self = ConnectionState::Connected(data);
                Ok(())
            }
            _ => Err(self.refuse("succeed")),
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), InvalidTransition> {
        match self {
            ConnectionState::Connecting => {
                *self = ConnectionState::Error(message.into());
                Ok(())
            }
            _ => Err(self.refuse("fail")),
        }
    }

    pub fn disconnect(&mut self) -> Result<(), InvalidTransition> {
        match self {
            ConnectionState::Connected(_) => {
                *self = ConnectionState::Idle;
                Ok(())
            }
            _ => Err(self.refuse("disconnect")),
        }
    }

    fn refuse(&self, event: &'static str) -> InvalidTransition {
        InvalidTransition {
            from: self.name(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use visitcell_core::SessionKey;

    fn data() -> SessionData {
        SessionData {
            session_id: SessionKey::derive("s"),
            visit_count: 1,
        }
    }

    #[test]
    fn happy_path() {
        let mut s = ConnectionState::default();
        s.submit().unwrap();
        assert_eq!(s, ConnectionState::Connecting);
        s.succeed(data()).unwrap();
        assert_eq!(s, ConnectionState::Connected(data()));
        s.disconnect().unwrap();
        assert_eq!(s, ConnectionState::Idle);
    }

    #[test]
    fn retry_after_error() {
        let mut s = ConnectionState::default();
        s.submit().unwrap();
        s.fail("Edge rejected request with HTTP status 500").unwrap();
        assert_eq!(s.name(), "error");
        s.submit().unwrap();
        assert_eq!(s, ConnectionState::Connecting);
    }

    #[test]
    fn refused_transitions_keep_state() {
        let mut s = ConnectionState::default();
        assert_eq!(
            s.succeed(data()).unwrap_err(),
            InvalidTransition { from: "idle", event: "succeed" }
        );
        assert!(s.fail("x").is_err());
        assert!(s.disconnect().is_err());
        assert_eq!(s, ConnectionState::Idle);

        s.submit().unwrap();
        assert!(s.submit().is_err());
        assert_eq!(s, ConnectionState::Connecting);

        s.succeed(data()).unwrap();
        assert!(s.submit().is_err());
        assert_eq!(s.name(), "connected");
    }
}
