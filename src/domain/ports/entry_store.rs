//! Entry store port.

use async_trait::async_trait;
use std::time::Duration;

use super::errors::StoreResult;

/// Key-value store holding one hash per key, with key-level expiration.
///
/// Implementations must be cheap to share across tasks; the cache never
/// pools or serializes access itself. A single field write is expected to
/// be atomic, nothing more.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Read one hash field. `None` when the key or field is absent.
    async fn get_field(&self, key: &str, field: &str) -> StoreResult<Option<String>>;

    /// Write one hash field, creating the key if needed.
    async fn set_field(&self, key: &str, field: &str, value: &str) -> StoreResult<()>;

    /// Whether the key currently exists.
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Set the key's time-to-live. Returns `false` if the store did not apply it.
    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<bool>;

    /// Remaining time-to-live. `None` when the key is absent or never expires.
    async fn time_to_live(&self, key: &str) -> StoreResult<Option<Duration>>;

    /// Liveness probe.
    async fn ping(&self) -> StoreResult<()>;
}
