//! pipeline-cache - short-lived cache for pipeline execution artifacts
//!
//! Each pipeline run owns one entry in a keyed hash store. The entry holds up to
//! four artifacts (status, run output, compile output, execution graph) and is
//! discarded by the store once its retention window lapses. Every write restarts
//! that window.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): value types, errors and the store/cache ports
//! - **Service Layer** (`services`): the cache itself, generic over any entry store
//! - **Adapters** (`adapters`): Redis and in-memory entry stores
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use pipeline_cache::{artifact, build_cache, ConfigLoader, ExecutionCacheExt, ExecutionStatus, PipelineId};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let cache = build_cache(&config).await?;
//!     let id = PipelineId::new();
//!     cache.set::<artifact::Status>(id, ExecutionStatus::Executing).await?;
//!     assert_eq!(cache.get::<artifact::Status>(id).await?, ExecutionStatus::Executing);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{InMemoryEntryStore, RedisEntryStore};
pub use domain::models::{artifact, CacheValue, Config, ExecutionStatus, PipelineId, SubKey};
pub use domain::ports::{EntryStore, ExecutionCache, ExecutionCacheExt, StoreError};
pub use domain::{CacheError, CacheResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{build_cache, DynPipelineCache, PipelineCache, DEFAULT_RETENTION};
