//! Redis-backed entry store.
//!
//! Each pipeline entry is a Redis hash; TTLs are applied with `PEXPIRE`.

pub mod connection;
pub mod entry_store;

pub use connection::{connect, normalize_address};
pub use entry_store::{RedisEntryStore, DEFAULT_OPERATION_TIMEOUT};
