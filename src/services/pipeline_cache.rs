//! Pipeline Cache Service
//!
//! Implements [`ExecutionCache`] on top of any [`EntryStore`]. Each pipeline
//! owns one hash in the store, keyed by its UUID; every sub-key is one field
//! of that hash.
//!
//! A write and its TTL refresh are two separate store calls. If the refresh
//! fails the value stays written and the error is reported; nothing is rolled
//! back or retried.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::models::{CacheValue, PipelineId, SubKey};
use crate::domain::ports::{EntryStore, ExecutionCache, StoreError};

/// TTL applied to a pipeline entry after each successful write.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(15 * 60);

/// Store-backed execution cache.
///
/// Holds no state besides the store handle, so it can be cloned or shared
/// freely between tasks.
pub struct PipelineCache<S: EntryStore + ?Sized> {
    store: Arc<S>,
    retention: Duration,
}

impl<S: EntryStore + ?Sized> Clone for PipelineCache<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            retention: self.retention,
        }
    }
}

impl<S: EntryStore + ?Sized> PipelineCache<S> {
    /// Create a cache with the default 15 minute retention window.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_retention(store, DEFAULT_RETENTION)
    }

    /// Create with a custom retention window.
    pub fn with_retention(store: Arc<S>, retention: Duration) -> Self {
        Self { store, retention }
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// TTL applied after each write.
    pub const fn retention(&self) -> Duration {
        self.retention
    }

    /// Remaining lifetime of a pipeline's entry, if it exists and expires.
    pub async fn time_to_live(&self, pipeline_id: PipelineId) -> CacheResult<Option<Duration>> {
        Ok(self.store.time_to_live(&pipeline_id.store_key()).await?)
    }

    /// Check that the store answers.
    pub async fn ping(&self) -> CacheResult<()> {
        Ok(self.store.ping().await?)
    }

    async fn apply_ttl(&self, key: &str, ttl: Duration) -> CacheResult<()> {
        let applied = self.store.expire(key, ttl).await.inspect_err(|err| {
            warn!(key, error = %err, "failed to set entry expiration");
        })?;

        if !applied {
            warn!(key, "store refused entry expiration");
            return Err(StoreError::ExpireRejected {
                key: key.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl<S: EntryStore + ?Sized + 'static> ExecutionCache for PipelineCache<S> {
    #[instrument(level = "debug", skip(self), fields(pipeline_id = %pipeline_id, sub_key = %sub_key))]
    async fn get_value(&self, pipeline_id: PipelineId, sub_key: SubKey) -> CacheResult<CacheValue> {
        let key = pipeline_id.store_key();
        let raw = self
            .store
            .get_field(&key, &sub_key.wire_field())
            .await
            .inspect_err(|err| warn!(error = %err, "failed to read cached value"))?
            .ok_or(CacheError::ValueNotFound {
                pipeline_id,
                sub_key,
            })?;

        let value = CacheValue::decode(sub_key, &raw)?;
        debug!(bytes = raw.len(), "cache hit");
        Ok(value)
    }

    #[instrument(level = "debug", skip(self, value), fields(pipeline_id = %pipeline_id, sub_key = %value.sub_key()))]
    async fn set_value(&self, pipeline_id: PipelineId, value: CacheValue) -> CacheResult<()> {
        let key = pipeline_id.store_key();
        let field = value.sub_key().wire_field();
        let payload = value.encode()?;

        self.store
            .set_field(&key, &field, &payload)
            .await
            .inspect_err(|err| warn!(error = %err, "failed to write cached value"))?;

        self.apply_ttl(&key, self.retention).await?;
        debug!(
            bytes = payload.len(),
            ttl_ms = u64::try_from(self.retention.as_millis()).unwrap_or(u64::MAX),
            "cached value"
        );
        Ok(())
    }

    #[instrument(level = "debug", skip(self), fields(pipeline_id = %pipeline_id, ttl = ?ttl))]
    async fn set_expiration_time(&self, pipeline_id: PipelineId, ttl: Duration) -> CacheResult<()> {
        let key = pipeline_id.store_key();
        let exists = self
            .store
            .exists(&key)
            .await
            .inspect_err(|err| warn!(error = %err, "failed to check entry existence"))?;

        if !exists {
            return Err(CacheError::EntryNotFound(pipeline_id));
        }

        self.apply_ttl(&key, ttl).await?;
        debug!("entry expiration updated");
        Ok(())
    }
}
