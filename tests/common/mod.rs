//! Shared fixtures for integration tests.

use std::sync::Arc;
use std::time::Duration;

use pipeline_cache::{DynPipelineCache, EntryStore, InMemoryEntryStore, PipelineCache};

/// A cache over a fresh in-memory store with the default retention.
///
/// Returns the store as well so tests can inspect it directly.
pub fn memory_cache() -> (Arc<InMemoryEntryStore>, DynPipelineCache) {
    let store = Arc::new(InMemoryEntryStore::new());
    let dyn_store: Arc<dyn EntryStore> = store.clone();
    (store, PipelineCache::new(dyn_store))
}

/// Same as [`memory_cache`] with a custom retention window.
#[allow(dead_code)]
pub fn memory_cache_with_retention(retention: Duration) -> (Arc<InMemoryEntryStore>, DynPipelineCache) {
    let store = Arc::new(InMemoryEntryStore::new());
    let dyn_store: Arc<dyn EntryStore> = store.clone();
    (store, PipelineCache::with_retention(dyn_store, retention))
}

/// Setup test logging
///
/// Initializes a tracing subscriber that writes through the test harness.
#[allow(dead_code)]
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
