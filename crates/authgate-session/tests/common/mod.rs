//! Shared fixtures: fault-injecting store wrappers and a seeded directory.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use authgate_directory::{DirectoryError, MemoryUserDirectory, UserDirectory};
use authgate_record::{CredentialRecord, UserId};
use authgate_session::{PasswordConfig, PasswordHasher};
use authgate_store::{
    CacheStore, MemoryCacheStore, MemorySessionStore, SessionStore, StoreError,
};
use serde_json::Value;

/// Minimum Argon2 cost so the tests stay fast.
pub fn fast_hasher() -> PasswordHasher {
    PasswordHasher::new(PasswordConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .expect("valid params")
}

/// alice (42, "correct") and bob (7, "hunter2").
pub async fn seeded_directory(hasher: &PasswordHasher) -> MemoryUserDirectory {
    let dir = MemoryUserDirectory::new();
    for (id, name, password) in [(42, "alice", "correct"), (7, "bob", "hunter2")] {
        let hash = hasher.hash(password).expect("hash");
        dir.insert(CredentialRecord::new(UserId(id), name, hash))
            .await
            .expect("insert");
    }
    dir
}

fn outage(what: &str) -> StoreError {
    StoreError::Unavailable(format!("{what} is down"))
}

// ---------------------------------------------------------------------------
// FlakyCache
// ---------------------------------------------------------------------------

/// A [`MemoryCacheStore`] that fails every call while `down` is set.
#[derive(Clone, Default)]
pub struct FlakyCache {
    pub inner: MemoryCacheStore,
    down: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl FlakyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// Number of calls made, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn guard(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            Err(outage("cache"))
        } else {
            Ok(())
        }
    }
}

impl CacheStore for FlakyCache {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        self.guard()?;
        self.inner.set(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.guard()?;
        self.inner.get(key).await
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        self.guard()?;
        self.inner.delete(key).await
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, StoreError> {
        self.guard()?;
        self.inner.ttl(key).await
    }
}

// ---------------------------------------------------------------------------
// FlakySession
// ---------------------------------------------------------------------------

/// A [`MemorySessionStore`] whose writes fail while `writes_down` is set
/// and whose reads fail while `reads_down` is set. The toggles are
/// independent, so tests can inspect what was (not) written.
#[derive(Clone, Default)]
pub struct FlakySession {
    pub inner: MemorySessionStore,
    writes_down: Arc<AtomicBool>,
    reads_down: Arc<AtomicBool>,
}

impl FlakySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_writes_down(&self, down: bool) {
        self.writes_down.store(down, Ordering::SeqCst);
    }

    pub fn set_reads_down(&self, down: bool) {
        self.reads_down.store(down, Ordering::SeqCst);
    }

    fn guard(&self) -> Result<(), StoreError> {
        if self.writes_down.load(Ordering::SeqCst) {
            Err(outage("session"))
        } else {
            Ok(())
        }
    }

    fn read_guard(&self) -> Result<(), StoreError> {
        if self.reads_down.load(Ordering::SeqCst) {
            Err(outage("session"))
        } else {
            Ok(())
        }
    }
}

impl SessionStore for FlakySession {
    async fn write(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.guard()?;
        self.inner.write(key, value).await
    }

    async fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.read_guard()?;
        self.inner.read(key).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.guard()?;
        self.inner.delete(key).await
    }

    async fn check(&self, key: &str) -> Result<bool, StoreError> {
        self.read_guard()?;
        self.inner.check(key).await
    }
}

// ---------------------------------------------------------------------------
// UnreachableDirectory
// ---------------------------------------------------------------------------

/// A directory whose backing database is unreachable.
#[derive(Clone, Default)]
pub struct UnreachableDirectory;

impl UserDirectory for UnreachableDirectory {
    async fn find_by_username(
        &self,
        _username: &str,
    ) -> Result<Option<CredentialRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".into()))
    }
}
