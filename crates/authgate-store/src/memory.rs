//! In-process store implementations.
//!
//! Both stores are handles around `Arc<Mutex<..>>`: cloning one gives you
//! another handle to the SAME data, the way cloning a connection pool does.
//! That lets tests (and single-process deployments) hand one cache to many
//! authentication services while still inspecting it from the outside.
//!
//! `tokio::sync::Mutex` rather than `std::sync::Mutex`: the lock is never
//! poisoned, so there is no panic path to turn into an error.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::{CacheStore, SessionPath, SessionStore, StoreError, is_present};

/// Shortest TTL a cache entry may have. Matches Redis `EX` granularity.
const MIN_TTL: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// MemorySessionStore
// ---------------------------------------------------------------------------

/// A [`SessionStore`] holding one session's document in memory.
///
/// Each call to [`fresh`](Self::fresh) starts a new, empty session
/// context; clones share it.
#[derive(Debug, Clone)]
pub struct MemorySessionStore {
    root: Arc<Mutex<Value>>,
}

impl MemorySessionStore {
    /// Creates an empty session context.
    pub fn fresh() -> Self {
        Self {
            root: Arc::new(Mutex::new(Value::Object(Map::new()))),
        }
    }

    /// Returns a copy of the whole session document.
    pub async fn snapshot(&self) -> Value {
        self.root.lock().await.clone()
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::fresh()
    }
}

impl SessionStore for MemorySessionStore {
    async fn write(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let path = SessionPath::parse(key)?;
        path.insert(&mut *self.root.lock().await, value);
        tracing::trace!(key, "session write");
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = SessionPath::parse(key)?;
        let root = self.root.lock().await;
        Ok(path.get(&root).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = SessionPath::parse(key)?;
        let removed = path.remove(&mut *self.root.lock().await);
        tracing::trace!(key, existed = removed.is_some(), "session delete");
        Ok(())
    }

    async fn check(&self, key: &str) -> Result<bool, StoreError> {
        let path = SessionPath::parse(key)?;
        let root = self.root.lock().await;
        Ok(path.get(&root).is_some_and(is_present))
    }
}

// ---------------------------------------------------------------------------
// MemoryCacheStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// A [`CacheStore`] backed by a `HashMap` with lazy expiry.
///
/// Expired entries are dropped when they are next touched, or in bulk by
/// [`purge_expired`](Self::purge_expired). Time comes from
/// `tokio::time::Instant`, so a paused test runtime controls expiry.
#[derive(Debug, Clone, Default)]
pub struct MemoryCacheStore {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl MemoryCacheStore {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every expired entry. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        let purged = before - entries.len();
        if purged > 0 {
            tracing::debug!(purged, "purged expired cache entries");
        }
        purged
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    /// Returns `true` if there are no live entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl CacheStore for MemoryCacheStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        if ttl < MIN_TTL {
            return Err(StoreError::InvalidTtl);
        }
        let entry = CacheEntry {
            value: value.to_owned(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().await.insert(key.to_owned(), entry);
        tracing::trace!(key, ttl_secs = ttl.as_secs(), "cache set");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let now = Instant::now();
        let removed = self.entries.lock().await.remove(key);
        Ok(removed.is_some_and(|entry| entry.is_live(now)))
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => {
                Ok(Some(entry.expires_at.saturating_duration_since(now)))
            }
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }
}
