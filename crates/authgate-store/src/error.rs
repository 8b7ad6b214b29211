//! Error types for the store layer.

/// Errors that can occur in a session or cache store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached or refused the operation.
    /// For a remote cache this covers connection loss and timeouts
    /// reported by the client.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The key is empty or contains an empty path segment (`"Auth..id"`).
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    /// Cache entries need a TTL of at least one second.
    #[error("ttl must be at least one second")]
    InvalidTtl,
}
