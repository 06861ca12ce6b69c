use async_trait::async_trait;

use visitcell_core::error::Result;
use visitcell_core::SessionKey;

/// Durable storage for one integer per key.
///
/// Implementations do not serialize access themselves. Callers must ensure
/// at most one writer per key at a time; the counter actor does.
#[async_trait]
pub trait KeyedDurableCell: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Last committed value, or `None` if the key was never written.
    async fn get(&self, key: &SessionKey) -> Result<Option<u64>>;

    /// Store `value`. Returns only once the value is durable.
    async fn put(&self, key: &SessionKey, value: u64) -> Result<()>;

    /// Flush anything buffered. Called on shutdown.
    async fn flush(&self) -> Result<()>;
}
