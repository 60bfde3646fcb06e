//! In-memory entry store for single-process deployments and tests.

pub mod entry_store;

pub use entry_store::InMemoryEntryStore;
