//! Error types for the record layer.
//!
//! Each crate in Authgate defines its own error enum. A `RecordError` always
//! means "turning a record into bytes (or back) went wrong", never a store
//! or directory problem.

/// Errors that can occur while encoding or decoding records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Serialization failed (turning a record into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a record).
    ///
    /// Common causes: a cache entry written by an older schema, or bytes
    /// that were never JSON in the first place.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The bytes decoded but don't describe a valid record.
    #[error("invalid record: {0}")]
    Invalid(String),
}
