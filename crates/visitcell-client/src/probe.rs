use visitcell_core::SessionData;

use crate::client::SessionClient;
use crate::diagnostics::DiagnosticSlot;
use crate::error::{ClientError, InvalidTransition};
use crate::state::ConnectionState;

/// Error message left behind when a `connect` is dropped before it finishes.
pub const CANCELLED: &str = "connection attempt cancelled";

/// Moves a still-`Connecting` state to `Error` when dropped.
struct PendingConnect<'a> {
    state: &'a mut ConnectionState,
}

impl Drop for PendingConnect<'_> {
    fn drop(&mut self) {
        if matches!(self.state, ConnectionState::Connecting) {
            tracing::debug!("session fetch dropped before completion");
            *self.state = ConnectionState::Error(CANCELLED.to_string());
        }
    }
}

/// One client connection: HTTP call, state machine, and diagnostic slot.
#[derive(Debug)]
pub struct Probe {
    client: SessionClient,
    state: ConnectionState,
    diagnostics: DiagnosticSlot,
}

impl Probe {
    pub fn new(client: SessionClient) -> Self {
        Self {
            client,
            state: ConnectionState::default(),
            diagnostics: DiagnosticSlot::new(),
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn diagnostics(&self) -> DiagnosticSlot {
        self.diagnostics.clone()
    }

    /// Submit (or retry) a session fetch.
    ///
    /// Transport and rejection failures move the state to `Error` and are
    /// returned; nothing is swallowed. If this future is dropped mid-fetch the
    /// state becomes `Error(CANCELLED)`, so a later `connect` can retry.
    pub async fn connect(&mut self) -> Result<SessionData, ClientError> {
        self.state.submit()?;
        let pending = PendingConnect {
            state: &mut self.state,
        };

        match self.client.fetch_session().await {
            Ok(data) => {
                pending.state.succeed(data.clone())?;
                self.diagnostics.attach(data.clone());
                Ok(data)
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.client.endpoint(), error = %e, "session fetch failed");
                pending.state.fail(e.to_string())?;
                Err(e)
            }
        }
    }

    pub fn disconnect(&mut self) -> Result<(), InvalidTransition> {
        self.state.disconnect()?;
        self.diagnostics.clear();
        Ok(())
    }
}
