//! Redis implementation of the EntryStore.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisResult};
use std::future::Future;
use std::time::Duration;

use super::connection;
use crate::domain::errors::CacheResult;
use crate::domain::ports::{EntryStore, StoreError, StoreResult};

/// Default deadline for a single store command.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(2);

/// Entry store backed by Redis hashes.
///
/// `ConnectionManager` multiplexes one connection and reconnects on its own,
/// so clones of this store share it.
#[derive(Clone)]
pub struct RedisEntryStore {
    conn: ConnectionManager,
    operation_timeout: Duration,
}

impl RedisEntryStore {
    /// Wrap a connection with the default per-command timeout.
    pub fn new(conn: ConnectionManager) -> Self {
        Self::with_operation_timeout(conn, DEFAULT_OPERATION_TIMEOUT)
    }

    /// Wrap a connection, bounding every command by `operation_timeout`.
    pub fn with_operation_timeout(conn: ConnectionManager, operation_timeout: Duration) -> Self {
        Self {
            conn,
            operation_timeout,
        }
    }

    /// Connect to `address` and verify the server answers within `deadline`.
    pub async fn connect(address: &str, deadline: Duration) -> CacheResult<Self> {
        Ok(Self::new(connection::connect(address, deadline).await?))
    }

    async fn run<T, F>(&self, op: &'static str, command: F) -> StoreResult<T>
    where
        F: Future<Output = RedisResult<T>> + Send,
    {
        match tokio::time::timeout(self.operation_timeout, command).await {
            Ok(result) => result.map_err(|err| StoreError::command(op, err.to_string())),
            Err(_) => Err(StoreError::Timeout {
                op,
                after: self.operation_timeout,
            }),
        }
    }
}

/// Convert a TTL to whole milliseconds, never rounding a non-zero TTL down to zero.
fn ttl_millis(ttl: Duration) -> i64 {
    let millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    if millis == 0 && !ttl.is_zero() {
        1
    } else {
        millis
    }
}

/// Interpret a `PTTL` reply. `-2` means no such key, `-1` a key without expiry.
fn ttl_from_pttl(millis: i64) -> Option<Duration> {
    u64::try_from(millis).ok().map(Duration::from_millis)
}

#[async_trait]
impl EntryStore for RedisEntryStore {
    async fn get_field(&self, key: &str, field: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        self.run("HGET", conn.hget(key, field)).await
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        self.run("HSET", conn.hset(key, field, value)).await
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        self.run("EXISTS", conn.exists(key)).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        self.run("PEXPIRE", conn.pexpire(key, ttl_millis(ttl))).await
    }

    async fn time_to_live(&self, key: &str) -> StoreResult<Option<Duration>> {
        let mut conn = self.conn.clone();
        let millis: i64 = self.run("PTTL", conn.pttl(key)).await?;
        Ok(ttl_from_pttl(millis))
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _pong: String = self
            .run("PING", redis::cmd("PING").query_async(&mut conn))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::Value;

    #[test]
    fn test_ttl_millis() {
        assert_eq!(ttl_millis(Duration::from_secs(900)), 900_000);
        assert_eq!(ttl_millis(Duration::from_micros(10)), 1);
        assert_eq!(ttl_millis(Duration::ZERO), 0);
        assert_eq!(ttl_millis(Duration::MAX), i64::MAX);
    }

    #[test]
    fn test_ttl_from_pttl() {
        assert_eq!(ttl_from_pttl(-2), None);
        assert_eq!(ttl_from_pttl(-1), None);
        assert_eq!(ttl_from_pttl(0), Some(Duration::ZERO));
        assert_eq!(ttl_from_pttl(900_000), Some(Duration::from_secs(900)));
    }

    // Reply shapes the port methods decode into.
    #[test]
    fn test_reply_conversions() {
        let missing: Option<String> = redis::from_redis_value(&Value::Nil).unwrap();
        assert_eq!(missing, None);

        let field: Option<String> = redis::from_redis_value(&Value::BulkString(b"8".to_vec())).unwrap();
        assert_eq!(field.as_deref(), Some("8"));

        let exists: bool = redis::from_redis_value(&Value::Int(1)).unwrap();
        assert!(exists);
        let applied: bool = redis::from_redis_value(&Value::Int(0)).unwrap();
        assert!(!applied);

        let pttl: i64 = redis::from_redis_value(&Value::Int(-2)).unwrap();
        assert_eq!(ttl_from_pttl(pttl), None);
    }
}
