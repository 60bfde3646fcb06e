//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces at the edges of the cache:
//! - EntryStore: hash-per-key storage with key-level TTL, implemented by adapters
//! - ExecutionCache: typed artifact access, implemented by services
//!
//! These traits keep the domain independent of any specific store.

pub mod entry_store;
pub mod errors;
pub mod execution_cache;

pub use entry_store::EntryStore;
pub use errors::{StoreError, StoreResult};
pub use execution_cache::{ExecutionCache, ExecutionCacheExt};
