//! Builds a ready-to-use cache from configuration.

use std::sync::Arc;
use tracing::info;

use crate::adapters::{InMemoryEntryStore, RedisEntryStore};
use crate::adapters::redis_store::connect;
use crate::domain::errors::CacheResult;
use crate::domain::models::{Config, StoreBackend};
use crate::domain::ports::EntryStore;
use crate::services::PipelineCache;

/// A cache over whichever store the configuration selects.
pub type DynPipelineCache = PipelineCache<dyn EntryStore>;

/// Construct the configured store and wrap it in a [`PipelineCache`].
///
/// For the Redis backend this fails with `CacheError::Connection` when the
/// server does not answer a PING within `store.connect_timeout_ms`. The
/// memory backend also starts its expiry sweeper, which must run inside a
/// Tokio runtime.
pub async fn build_cache(config: &Config) -> CacheResult<DynPipelineCache> {
    let store: Arc<dyn EntryStore> = match config.store.backend {
        StoreBackend::Redis => {
            let conn = connect(&config.store.address, config.store.connect_timeout()).await?;
            Arc::new(RedisEntryStore::with_operation_timeout(
                conn,
                config.store.operation_timeout(),
            ))
        }
        StoreBackend::Memory => {
            let store = Arc::new(InMemoryEntryStore::new());
            // Detached; the sweeper exits once the store is dropped.
            let _sweeper = store.spawn_sweeper(config.store.sweep_interval());
            store
        }
    };

    info!(
        backend = ?config.store.backend,
        retention_secs = config.cache.retention_secs,
        "execution cache ready"
    );
    Ok(PipelineCache::with_retention(store, config.cache.retention()))
}
