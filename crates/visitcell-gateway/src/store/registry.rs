use std::sync::Arc;
use std::time::Instant;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::{mpsc, oneshot};

use visitcell_core::error::{Result, VisitCellError};
use visitcell_core::SessionKey;

use super::actor::{Command, CounterActor, Reply};
use super::cell::KeyedDurableCell;
use crate::obs::GatewayMetrics;

/// Per-key counter store:
/// - `SessionKey -> actor mailbox`
/// - actors are spawned lazily and live for the rest of the process
///
/// All reads and writes of a key's value go through its actor.
pub struct CounterStore {
    cell: Arc<dyn KeyedDurableCell>,
    actors: DashMap<SessionKey, mpsc::Sender<Command>>,
    mailbox_capacity: usize,
    metrics: Arc<GatewayMetrics>,
}

impl CounterStore {
    pub fn new(
        cell: Arc<dyn KeyedDurableCell>,
        mailbox_capacity: usize,
        metrics: Arc<GatewayMetrics>,
    ) -> Self {
        Self {
            cell,
            actors: DashMap::new(),
            mailbox_capacity,
            metrics,
        }
    }

    /// Atomically add one to `key` and return the new, durably committed value.
    pub async fn increment_and_get(&self, key: &SessionKey) -> Result<u64> {
        let started = Instant::now();
        let res = self.request(key, |reply| Command::Increment { reply }).await;
        self.metrics.increment_duration.observe(&[], started.elapsed());
        res
    }

    /// Committed value for `key` (0 if never incremented).
    pub async fn peek(&self, key: &SessionKey) -> Result<u64> {
        self.request(key, |reply| Command::Peek { reply }).await
    }

    /// Number of keys with a registered actor.
    pub fn registered_actors(&self) -> usize {
        self.actors.len()
    }

    pub fn backend(&self) -> &'static str {
        self.cell.backend()
    }

    pub async fn flush(&self) -> Result<()> {
        self.cell.flush().await
    }

    async fn request(&self, key: &SessionKey, make: impl Fn(Reply) -> Command) -> Result<u64> {
        let mut tx = self.mailbox(key);

        // A closed mailbox means the actor task is gone; replace it once.
        for _ in 0..2 {
            let (reply_tx, reply_rx) = oneshot::channel();
            match tx.send(make(reply_tx)).await {
                Ok(()) => {
                    return reply_rx.await.map_err(|_| {
                        VisitCellError::Internal(format!("counter actor for {key} dropped the reply"))
                    })?;
                }
                Err(_) => {
                    tracing::warn!(%key, "counter actor mailbox closed, respawning");
                    tx = self.replace_dead(key, &tx);
                }
            }
        }

        Err(VisitCellError::Internal(format!("counter actor for {key} unavailable")))
    }

    fn spawn(&self, key: &SessionKey) -> mpsc::Sender<Command> {
        CounterActor::spawn(
            key.clone(),
            Arc::clone(&self.cell),
            Arc::clone(&self.metrics),
            self.mailbox_capacity,
        )
    }

    fn mailbox(&self, key: &SessionKey) -> mpsc::Sender<Command> {
        if let Some(tx) = self.actors.get(key) {
            return tx.value().clone();
        }
        self.actors
            .entry(key.clone())
            .or_insert_with(|| self.spawn(key))
            .value()
            .clone()
    }

    /// Swap out `dead` for a fresh actor, unless another caller already did.
    fn replace_dead(&self, key: &SessionKey, dead: &mpsc::Sender<Command>) -> mpsc::Sender<Command> {
        match self.actors.entry(key.clone()) {
            Entry::Occupied(mut e) => {
                if e.get().same_channel(dead) {
                    let tx = self.spawn(key);
                    e.insert(tx.clone());
                    tx
                } else {
                    e.get().clone()
                }
            }
            Entry::Vacant(v) => v.insert(self.spawn(key)).value().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::store::MemoryCell;

    fn store() -> CounterStore {
        CounterStore::new(Arc::new(MemoryCell::new()), 8, Arc::new(GatewayMetrics::new()))
    }

    #[tokio::test]
    async fn one_actor_per_key() {
        let s = store();
        let a = SessionKey::derive("a");
        let b = SessionKey::derive("b");
        s.increment_and_get(&a).await.unwrap();
        s.increment_and_get(&a).await.unwrap();
        s.increment_and_get(&b).await.unwrap();
        assert_eq!(s.registered_actors(), 2);
    }

    #[tokio::test]
    async fn dead_actor_is_replaced() {
        let s = store();
        let key = SessionKey::derive("k");
        assert_eq!(s.increment_and_get(&key).await.unwrap(), 1);

        // Simulate the actor task disappearing: swap in a sender whose receiver is gone.
        let (dead_tx, dead_rx) = mpsc::channel(1);
        drop(dead_rx);
        s.actors.insert(key.clone(), dead_tx);

        assert_eq!(s.increment_and_get(&key).await.unwrap(), 2);
        assert_eq!(s.registered_actors(), 1);
    }

    #[tokio::test]
    async fn peek_does_not_mutate() {
        let s = store();
        let key = SessionKey::derive("k");
        assert_eq!(s.peek(&key).await.unwrap(), 0);
        s.increment_and_get(&key).await.unwrap();
        assert_eq!(s.peek(&key).await.unwrap(), 1);
        assert_eq!(s.peek(&key).await.unwrap(), 1);
    }
}
