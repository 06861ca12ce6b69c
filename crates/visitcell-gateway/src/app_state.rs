//! Shared application state for the visitcell gateway.
//!
//! - Derive the SessionKey once from the configured seed.
//! - Open the configured storage backend and wrap it in a CounterStore.
//! - Startup errors are returned, not panicked.

use std::sync::Arc;

use visitcell_core::error::Result;
use visitcell_core::SessionKey;

use crate::config::GatewayConfig;
use crate::obs::GatewayMetrics;
use crate::store::{self, CounterStore, KeyedDurableCell};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<CounterStore>,
    metrics: Arc<GatewayMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    session_key: SessionKey,
}

impl AppState {
    /// Build application state with the backend named in `cfg.storage`.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let cell = store::open_cell(&cfg.storage)?;
        Ok(Self::with_cell(cfg, cell))
    }

    /// Build application state over an explicit cell (tests, embedding).
    pub fn with_cell(cfg: GatewayConfig, cell: Arc<dyn KeyedDurableCell>) -> Self {
        let metrics = Arc::new(GatewayMetrics::new());
        let store = CounterStore::new(cell, cfg.storage.mailbox_capacity, Arc::clone(&metrics));
        let session_key = SessionKey::derive(&cfg.session.seed);

        Self {
            inner: Arc::new(AppStateInner { cfg, session_key }),
            store: Arc::new(store),
            metrics,
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    /// Key every `/api/session` request resolves to.
    pub fn session_key(&self) -> &SessionKey {
        &self.inner.session_key
    }

    pub fn store(&self) -> Arc<CounterStore> {
        Arc::clone(&self.store)
    }

    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    /// Gauges computed at scrape time.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        vec![(
            "visitcell_actors_registered",
            self.store.registered_actors() as u64,
        )]
    }
}
