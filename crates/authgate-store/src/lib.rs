//! Store abstraction layer for Authgate.
//!
//! Provides the [`SessionStore`] and [`CacheStore`] traits that abstract over
//! where session state lives (in-process memory, a framework's session
//! handler, Redis/KeyDB, ...).
//!
//! The two stores are deliberately independent: the session store is
//! authoritative for "who is logged in", the cache store only mirrors it.
//! Nothing in this crate keeps them consistent; that is the job of the
//! authentication service, and even there it's best-effort.
//!
//! # Feature Flags
//!
//! - `memory` (default): [`MemorySessionStore`] and [`MemoryCacheStore`]
//! - `redis`: [`RedisCacheStore`] via `fred`

mod error;
#[cfg(feature = "memory")]
mod memory;
mod path;
#[cfg(feature = "redis")]
mod redis;

pub use error::StoreError;
#[cfg(feature = "memory")]
pub use memory::{MemoryCacheStore, MemorySessionStore};
pub use path::SessionPath;
#[cfg(feature = "redis")]
pub use redis::RedisCacheStore;

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

/// A key-value store scoped to ONE logical session (one caller).
///
/// Keys are dotted paths into a nested document: writing `"Auth.User"`
/// and then reading `"Auth.User.id"` returns the `id` field of what was
/// written. See [`SessionPath`] for the exact rules.
///
/// Implementations are cheap handles (clone = same session), so the
/// authentication service can hold one without owning the session's
/// lifecycle.
pub trait SessionStore: Send + Sync + 'static {
    /// Stores `value` at `key`, creating intermediate objects as needed.
    fn write(
        &self,
        key: &str,
        value: Value,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Returns the value at `key`, or `None` if any segment is missing.
    fn read(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    /// Removes the value at `key`. Removing a missing key is not an error.
    fn delete(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Returns `true` if `key` holds a non-empty value (not null, not `""`).
    fn check(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// A key-value store with per-key expiry, shared by every session.
///
/// Entries may disappear at any time once their TTL elapses. Callers must
/// treat a missing entry as "possibly expired", never as an error.
pub trait CacheStore: Send + Sync + 'static {
    /// Stores `value` at `key`, replacing any previous entry and TTL.
    ///
    /// # Errors
    /// [`StoreError::InvalidTtl`] if `ttl` is shorter than one second.
    fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Returns the live value at `key`.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Removes `key`. Returns `true` if a live entry was removed.
    fn delete(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Returns the remaining lifetime of `key`, or `None` if it is missing,
    /// expired, or has no expiry.
    fn ttl(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Duration>, StoreError>> + Send;
}

/// Returns `true` if a session value counts as "present" for
/// [`SessionStore::check`].
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
