//! Execution cache port.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::models::{Artifact, CacheValue, PipelineId, SubKey};

/// Typed, TTL-bounded storage for per-pipeline artifacts.
///
/// Object safe, so services can hold an `Arc<dyn ExecutionCache>` regardless
/// of which store backs it. Use [`ExecutionCacheExt`] for statically typed
/// access.
#[async_trait]
pub trait ExecutionCache: Send + Sync {
    /// Read the value cached under `sub_key` for `pipeline_id`.
    async fn get_value(&self, pipeline_id: PipelineId, sub_key: SubKey) -> CacheResult<CacheValue>;

    /// Store `value` under its sub-key and restart the entry's retention window.
    async fn set_value(&self, pipeline_id: PipelineId, value: CacheValue) -> CacheResult<()>;

    /// Replace the TTL of an existing entry.
    async fn set_expiration_time(&self, pipeline_id: PipelineId, ttl: Duration) -> CacheResult<()>;
}

/// Statically typed helpers on top of [`ExecutionCache`].
///
/// ```ignore
/// use pipeline_cache::domain::models::{artifact, ExecutionStatus};
///
/// cache.set::<artifact::Status>(id, ExecutionStatus::Finished).await?;
/// let status = cache.get::<artifact::Status>(id).await?;
/// ```
#[async_trait]
pub trait ExecutionCacheExt: ExecutionCache {
    /// Read a typed artifact.
    async fn get<A: Artifact>(&self, pipeline_id: PipelineId) -> CacheResult<A::Value> {
        let value = self.get_value(pipeline_id, A::SUB_KEY).await?;
        A::extract(value).map_err(|other| CacheError::ValueMismatch {
            expected: A::SUB_KEY,
            found: other.sub_key(),
        })
    }

    /// Write a typed artifact.
    async fn set<A: Artifact>(&self, pipeline_id: PipelineId, value: A::Value) -> CacheResult<()> {
        self.set_value(pipeline_id, A::wrap(value)).await
    }
}

impl<T: ExecutionCache + ?Sized> ExecutionCacheExt for T {}
