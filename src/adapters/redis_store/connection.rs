//! Redis connection management.

use redis::aio::ConnectionManager;
use std::time::Duration;
use tracing::{info, warn};

use crate::domain::errors::{CacheError, CacheResult};

/// Turn a bare `host:port` into a `redis://` URL; URLs pass through untouched.
pub fn normalize_address(address: &str) -> String {
    let address = address.trim();
    if address.contains("://") {
        address.to_string()
    } else {
        format!("redis://{address}")
    }
}

/// Open a managed connection and verify it answers `PING` within `deadline`.
///
/// The deadline covers URL parsing, the TCP handshake, and the probe
/// together. Any failure is reported as [`CacheError::Connection`].
pub async fn connect(address: &str, deadline: Duration) -> CacheResult<ConnectionManager> {
    let url = normalize_address(address);
    let connection_error = |reason: String| CacheError::Connection {
        address: address.to_string(),
        reason,
    };

    let client = redis::Client::open(url.as_str()).map_err(|err| connection_error(err.to_string()))?;

    let attempt = async {
        let mut manager = ConnectionManager::new(client).await?;
        let _pong: String = redis::cmd("PING").query_async(&mut manager).await?;
        Ok::<_, redis::RedisError>(manager)
    };

    match tokio::time::timeout(deadline, attempt).await {
        Ok(Ok(manager)) => {
            info!(address = %url, "connected to entry store");
            Ok(manager)
        }
        Ok(Err(err)) => {
            warn!(address = %url, error = %err, "entry store connection failed");
            Err(connection_error(err.to_string()))
        }
        Err(_) => {
            warn!(address = %url, ?deadline, "entry store did not answer in time");
            Err(connection_error(format!("no PING reply within {deadline:?}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_address() {
        assert_eq!(normalize_address("localhost:6379"), "redis://localhost:6379");
        assert_eq!(normalize_address(" redis://cache:6380/2 "), "redis://cache:6380/2");
        assert_eq!(normalize_address("rediss://secure:6379"), "rediss://secure:6379");
        assert_eq!(normalize_address("unix:///tmp/redis.sock"), "unix:///tmp/redis.sock");
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_address() {
        let Err(err) = connect("redis://[::1", Duration::from_millis(200)).await else {
            panic!("malformed address should not connect");
        };
        assert!(matches!(err, CacheError::Connection { .. }));
    }

    #[tokio::test]
    async fn test_connect_unreachable_store_fails_within_deadline() {
        // Port 1 is reserved and nothing should be listening there.
        let started = std::time::Instant::now();
        let Err(err) = connect("127.0.0.1:1", Duration::from_millis(500)).await else {
            panic!("nothing should answer on port 1");
        };
        assert!(matches!(err, CacheError::Connection { ref address, .. } if address == "127.0.0.1:1"));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
