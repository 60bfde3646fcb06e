//! Entry store adapters.

pub mod memory;
pub mod redis_store;

pub use memory::InMemoryEntryStore;
pub use redis_store::RedisEntryStore;
