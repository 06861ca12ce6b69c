//! sled-backed durable cell.
//!
//! Layout: one tree per key named `cell/<SessionKey>`, holding a single entry
//! `visitCount` whose value is a big-endian `u64`. Every `put` is followed by
//! `flush_async`, so a returned `Ok` means the value survives a crash. A
//! failed flush puts the previous entry back before the error is returned.

use std::path::Path;

use async_trait::async_trait;

use visitcell_core::error::{Result, VisitCellError};
use visitcell_core::SessionKey;

use super::cell::KeyedDurableCell;

#[derive(Debug, Clone)]
pub struct SledCell {
    db: sled::Db,
}

impl SledCell {
    const VALUE_KEY: &'static [u8] = b"visitCount";

    pub fn open(path: &Path) -> Result<Self> {
        let db = sled::open(path).map_err(|e| {
            VisitCellError::Storage(format!("could not open the db at {}: {e}", path.display()))
        })?;
        Ok(Self { db })
    }

    /// Wrap an already opened database (tests use `sled::Config::temporary`).
    pub fn from_db(db: sled::Db) -> Self {
        Self { db }
    }

    fn tree(&self, key: &SessionKey) -> Result<sled::Tree> {
        self.db
            .open_tree(format!("cell/{key}"))
            .map_err(|e| VisitCellError::Storage(format!("could not open tree for {key}: {e}")))
    }
}

/// Restore the entry `put` overwrote, or remove it if there was none.
fn rollback(tree: &sled::Tree, previous: Option<sled::IVec>) {
    let res = match previous {
        Some(old) => tree.insert(SledCell::VALUE_KEY, old).map(|_| ()),
        None => tree.remove(SledCell::VALUE_KEY).map(|_| ()),
    };
    if let Err(e) = res {
        tracing::error!(error = %e, "could not roll back an unflushed write");
    }
}

fn decode(key: &SessionKey, bytes: &[u8]) -> Result<u64> {
    let raw: [u8; 8] = bytes.try_into().map_err(|_| {
        VisitCellError::Storage(format!(
            "visit count for {key} is corrupted ({} bytes, expected 8)",
            bytes.len()
        ))
    })?;
    Ok(u64::from_be_bytes(raw))
}

#[async_trait]
impl KeyedDurableCell for SledCell {
    fn backend(&self) -> &'static str {
        "sled"
    }

    async fn get(&self, key: &SessionKey) -> Result<Option<u64>> {
        let tree = self.tree(key)?;
        let value = tree
            .get(Self::VALUE_KEY)
            .map_err(|e| VisitCellError::Storage(format!("could not read {key}: {e}")))?;

        value.map(|bytes| decode(key, &bytes)).transpose()
    }

    async fn put(&self, key: &SessionKey, value: u64) -> Result<()> {
        let tree = self.tree(key)?;
        let previous = tree
            .insert(Self::VALUE_KEY, &value.to_be_bytes()[..])
            .map_err(|e| VisitCellError::Storage(format!("could not write {key}: {e}")))?;

        if let Err(e) = tree.flush_async().await {
            rollback(&tree, previous);
            return Err(VisitCellError::Storage(format!("could not flush {key}: {e}")));
        }
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        self.db
            .flush_async()
            .await
            .map(|_| ())
            .map_err(|e| VisitCellError::Storage(format!("could not flush db: {e}")))
    }
}
