//! Codec trait and implementations for serializing records.
//!
//! The cache mirror stores a serialized [`SessionUser`](crate::SessionUser)
//! as a string value. The authentication service doesn't care HOW it's
//! serialized. It just needs something that implements [`Codec`].
//!
//! We provide [`JsonCodec`], which produces the same JSON a human would
//! expect to see when inspecting the cache with `redis-cli GET`.

use serde::{Serialize, de::DeserializeOwned};

use crate::RecordError;

/// A codec that can encode Rust types to strings and decode them back.
///
/// Strings (not bytes) because every cache backend we target stores
/// text values, and it keeps entries readable from the command line.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → the codec lives inside the authentication service,
///   which may be shared across Tokio worker threads.
/// - `'static` → it owns everything it needs.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into a string.
    ///
    /// # Errors
    /// Returns `RecordError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, RecordError>;

    /// Deserializes a string back into a value.
    ///
    /// # Errors
    /// Returns `RecordError::Decode` if the input is malformed or doesn't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &str) -> Result<T, RecordError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use authgate_record::{Codec, JsonCodec, SessionUser, UserId};
///
/// let codec = JsonCodec;
/// let user = SessionUser { id: UserId(42), username: "alice".into() };
///
/// let text = codec.encode(&user).unwrap();
/// assert_eq!(text, r#"{"id":42,"username":"alice"}"#);
///
/// let decoded: SessionUser = codec.decode(&text).unwrap();
/// assert_eq!(decoded, user);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, RecordError> {
        serde_json::to_string(value).map_err(RecordError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &str) -> Result<T, RecordError> {
        serde_json::from_str(data).map_err(RecordError::Decode)
    }
}
