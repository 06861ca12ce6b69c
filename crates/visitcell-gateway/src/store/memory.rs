use async_trait::async_trait;
use dashmap::DashMap;

use visitcell_core::error::Result;
use visitcell_core::SessionKey;

use super::cell::KeyedDurableCell;

/// Ephemeral cell for tests and throwaway runs. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryCell {
    values: DashMap<SessionKey, u64>,
}

impl MemoryCell {
    pub fn new() -> Self {
        Self {
            values: DashMap::new(),
        }
    }
}

#[async_trait]
impl KeyedDurableCell for MemoryCell {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &SessionKey) -> Result<Option<u64>> {
        Ok(self.values.get(key).map(|v| *v.value()))
    }

    async fn put(&self, key: &SessionKey, value: u64) -> Result<()> {
        self.values.insert(key.clone(), value);
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}
