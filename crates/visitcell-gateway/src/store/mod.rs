//! Counter Store: per-key serialized, durable visit counters.
//!
//! - `KeyedDurableCell`: storage capability (get/put one integer per key)
//! - `CounterActor`: single writer per key, fed by a bounded mailbox
//! - `CounterStore`: registry that addresses actors by SessionKey

mod actor;
mod cell;
mod memory;
mod registry;
mod sled_cell;

use std::path::Path;
use std::sync::Arc;

use visitcell_core::error::{Result, VisitCellError};

use crate::config::{StorageBackend, StorageSection};

pub use cell::KeyedDurableCell;
pub use memory::MemoryCell;
pub use registry::CounterStore;
pub use sled_cell::SledCell;

/// Open the backend selected by config.
pub fn open_cell(cfg: &StorageSection) -> Result<Arc<dyn KeyedDurableCell>> {
    match cfg.backend {
        StorageBackend::Sled => {
            let path = Path::new(&cfg.path);
            ensure_parent_exists(path)?;
            Ok(Arc::new(SledCell::open(path)?))
        }
        StorageBackend::Memory => {
            tracing::warn!("memory storage backend selected, counts will not survive a restart");
            Ok(Arc::new(MemoryCell::new()))
        }
    }
}

fn ensure_parent_exists(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tracing::info!(dir = %parent.display(), "creating storage directory");
            std::fs::create_dir_all(parent).map_err(|e| {
                VisitCellError::Storage(format!("could not create {}: {e}", parent.display()))
            })?;
        }
    }
    Ok(())
}
