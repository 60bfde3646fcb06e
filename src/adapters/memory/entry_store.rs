//! Process-local implementation of the EntryStore.
//!
//! Expired entries are invisible to every operation as soon as their
//! deadline passes; the optional sweeper only reclaims their memory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::ports::{EntryStore, StoreResult};

#[derive(Debug, Default)]
struct StoredEntry {
    fields: HashMap<String, String>,
    expires_at: Option<Instant>,
}

impl StoredEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

/// In-memory entry store backed by a `HashMap` of hashes.
#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl InMemoryEntryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a background task that drops expired entries every `interval`.
    ///
    /// The task stops on its own once the store is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                let removed = store.purge_expired().await;
                if removed > 0 {
                    debug!(removed, "swept expired cache entries");
                }
            }
        })
    }

    /// Remove every expired entry, returning how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Remove all entries.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no entries are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn get_field(&self, key: &str, field: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired(Instant::now()))
            .and_then(|entry| entry.fields.get(field).cloned()))
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(key.to_string()).or_default();
        if entry.is_expired(Instant::now()) {
            *entry = StoredEntry::default();
        }
        entry.fields.insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(Instant::now())))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now) => {
                // A deadline past the clock's range never arrives.
                entry.expires_at = now.checked_add(ttl);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn time_to_live(&self, key: &str) -> StoreResult<Option<Duration>> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .and_then(|entry| entry.expires_at)
            .map(|deadline| deadline.saturating_duration_since(now)))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_field_round_trip() {
        let store = InMemoryEntryStore::new();
        store.set_field("p1", "\"STATUS\"", "8").await.unwrap();

        assert_eq!(store.get_field("p1", "\"STATUS\"").await.unwrap(), Some("8".to_string()));
        assert_eq!(store.get_field("p1", "\"GRAPH\"").await.unwrap(), None);
        assert_eq!(store.get_field("p2", "\"STATUS\"").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = InMemoryEntryStore::new();
        store.set_field("p1", "f", "1").await.unwrap();
        store.set_field("p1", "f", "2").await.unwrap();
        assert_eq!(store.get_field("p1", "f").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_expire_requires_existing_key() {
        let store = InMemoryEntryStore::new();
        assert!(!store.expire("missing", Duration::from_secs(1)).await.unwrap());
        assert!(!store.exists("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_no_ttl_until_expire() {
        let store = InMemoryEntryStore::new();
        store.set_field("p1", "f", "v").await.unwrap();
        assert_eq!(store.time_to_live("p1").await.unwrap(), None);
        assert!(store.exists("p1").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_disappears_after_ttl() {
        let store = InMemoryEntryStore::new();
        store.set_field("p1", "f", "v").await.unwrap();
        assert!(store.expire("p1", Duration::from_secs(10)).await.unwrap());
        assert_eq!(store.time_to_live("p1").await.unwrap(), Some(Duration::from_secs(10)));

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(store.time_to_live("p1").await.unwrap(), Some(Duration::from_secs(6)));
        assert!(store.exists("p1").await.unwrap());

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(!store.exists("p1").await.unwrap());
        assert_eq!(store.get_field("p1", "f").await.unwrap(), None);
        assert_eq!(store.time_to_live("p1").await.unwrap(), None);
        assert!(!store.expire("p1", Duration::from_secs(10)).await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_after_expiry_starts_fresh_entry() {
        let store = InMemoryEntryStore::new();
        store.set_field("p1", "a", "1").await.unwrap();
        store.expire("p1", Duration::from_secs(1)).await.unwrap();
        tokio::time::advance(Duration::from_secs(2)).await;

        store.set_field("p1", "b", "2").await.unwrap();
        assert_eq!(store.get_field("p1", "a").await.unwrap(), None);
        assert_eq!(store.get_field("p1", "b").await.unwrap(), Some("2".to_string()));
        assert_eq!(store.time_to_live("p1").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrepresentable_ttl_never_expires() {
        let store = InMemoryEntryStore::new();
        store.set_field("p1", "f", "v").await.unwrap();
        assert!(store.expire("p1", Duration::MAX).await.unwrap());
        assert_eq!(store.time_to_live("p1").await.unwrap(), None);

        tokio::time::advance(Duration::from_secs(3600)).await;
        assert!(store.exists("p1").await.unwrap());
        assert_eq!(store.purge_expired().await, 0);

        // A later finite TTL still applies.
        assert!(store.expire("p1", Duration::from_secs(5)).await.unwrap());
        assert_eq!(store.time_to_live("p1").await.unwrap(), Some(Duration::from_secs(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_reclaims_expired_entries() {
        let store = Arc::new(InMemoryEntryStore::new());
        store.set_field("short", "f", "v").await.unwrap();
        store.set_field("long", "f", "v").await.unwrap();
        store.expire("short", Duration::from_secs(1)).await.unwrap();
        store.expire("long", Duration::from_secs(60)).await.unwrap();

        let handle = store.spawn_sweeper(Duration::from_secs(5));
        tokio::time::sleep(Duration::from_secs(6)).await;

        assert_eq!(store.len().await, 1);
        assert!(store.exists("long").await.unwrap());
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_when_store_dropped() {
        let store = Arc::new(InMemoryEntryStore::new());
        let handle = store.spawn_sweeper(Duration::from_secs(1));
        drop(store);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_clear() {
        let store = InMemoryEntryStore::new();
        store.set_field("p1", "f", "v").await.unwrap();
        store.clear().await;
        assert!(store.is_empty().await);
    }
}
