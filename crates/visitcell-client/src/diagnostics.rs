use std::sync::Arc;

use tokio::sync::watch;

use visitcell_core::SessionData;

/// Diagnostic handle to the live session.
///
/// Holds the session only between `attach` (on connect) and `clear` (on
/// disconnect). Clones share the same slot, so a debugging task can hold one
/// and `subscribe` to changes.
#[derive(Debug, Clone)]
pub struct DiagnosticSlot {
    tx: Arc<watch::Sender<Option<SessionData>>>,
}

impl Default for DiagnosticSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticSlot {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn attach(&self, session: SessionData) {
        tracing::debug!(session_id = %session.session_id, "diagnostic session attached");
        self.tx.send_replace(Some(session));
    }

    pub fn clear(&self) {
        if self.tx.send_replace(None).is_some() {
            tracing::debug!("diagnostic session cleared");
        }
    }

    pub fn current(&self) -> Option<SessionData> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SessionData>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visitcell_core::SessionKey;

    #[test]
    fn attach_then_clear() {
        let slot = DiagnosticSlot::new();
        let watcher = slot.clone();
        assert!(slot.current().is_none());

        let data = SessionData {
            session_id: SessionKey::derive("s"),
            visit_count: 4,
        };
        slot.attach(data.clone());
        assert_eq!(watcher.current(), Some(data));

        slot.clear();
        assert!(watcher.current().is_none());
    }
}
