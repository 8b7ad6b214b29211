//! Identity records for Authgate.
//!
//! This crate defines the data every other layer passes around:
//!
//! - **Types** ([`UserId`], [`CredentialRecord`], [`SessionUser`]): who a
//!   user is, with and without their secret.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how a session user is
//!   turned into the string value mirrored into the cache.
//! - **Errors** ([`RecordError`]): what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! ```text
//! Directory (CredentialRecord) → Session service → Stores (SessionUser)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::RecordError;
pub use types::{CredentialRecord, SessionUser, UserId};
