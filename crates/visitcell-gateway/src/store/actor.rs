//! Counter actor: the single writer for one SessionKey.
//!
//! One tokio task per key drains a bounded mailbox and handles one command at
//! a time, so increments for that key are linearized without locks. The last
//! committed value is cached after the first read; the cache only advances
//! once the durable `put` has succeeded.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use visitcell_core::error::{Result, VisitCellError};
use visitcell_core::SessionKey;

use super::cell::KeyedDurableCell;
use crate::obs::GatewayMetrics;

pub(crate) type Reply = oneshot::Sender<Result<u64>>;

pub(crate) enum Command {
    /// Add one, persist, and reply with the new value.
    Increment { reply: Reply },
    /// Reply with the committed value without changing it.
    Peek { reply: Reply },
}

pub(crate) struct CounterActor {
    key: SessionKey,
    cell: Arc<dyn KeyedDurableCell>,
    metrics: Arc<GatewayMetrics>,
    committed: Option<u64>,
    rx: mpsc::Receiver<Command>,
}

impl CounterActor {
    /// Spawn the actor for `key` and return its mailbox.
    pub(crate) fn spawn(
        key: SessionKey,
        cell: Arc<dyn KeyedDurableCell>,
        metrics: Arc<GatewayMetrics>,
        capacity: usize,
    ) -> mpsc::Sender<Command> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let actor = Self {
            key,
            cell,
            metrics,
            committed: None,
            rx,
        };
        tokio::spawn(actor.run());
        tx
    }

    async fn run(mut self) {
        self.metrics.actors_active.inc(&[]);
        tracing::debug!(key = %self.key, backend = self.cell.backend(), "counter actor started");

        while let Some(cmd) = self.rx.recv().await {
            match cmd {
                Command::Increment { reply } => {
                    let res = self.increment().await;
                    // Caller may have gone away; the increment still stands.
                    let _ = reply.send(res);
                }
                Command::Peek { reply } => {
                    let res = self.load().await;
                    let _ = reply.send(res);
                }
            }
        }

        self.metrics.actors_active.dec(&[]);
        tracing::debug!(key = %self.key, "counter actor stopped");
    }

    async fn load(&mut self) -> Result<u64> {
        if let Some(v) = self.committed {
            return Ok(v);
        }

        let stored = self.cell.get(&self.key).await.map_err(|e| {
            self.metrics.storage_failures.inc(&[("op", "get")]);
            e
        })?;
        let v = stored.unwrap_or(0);
        self.committed = Some(v);
        Ok(v)
    }

    async fn increment(&mut self) -> Result<u64> {
        let current = self.load().await?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| VisitCellError::Storage(format!("visit count overflow for {}", self.key)))?;

        self.cell.put(&self.key, next).await.map_err(|e| {
            self.metrics.storage_failures.inc(&[("op", "put")]);
            e
        })?;

        self.committed = Some(next);
        Ok(next)
    }
}
