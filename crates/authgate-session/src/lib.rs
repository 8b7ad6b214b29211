//! Session-backed authentication for Authgate.
//!
//! This crate owns the login/logout logic:
//!
//! 1. **Verification**: checking a password against the stored Argon2id
//!    hash ([`PasswordHasher`])
//! 2. **Session state**: recording who is logged in under `Auth.User`
//!    ([`AuthenticationService`])
//! 3. **Cache mirror**: copying the logged-in user to `user_session_<id>`
//!    in a shared cache with a 24-hour TTL
//!
//! # How it fits in the stack
//!
//! ```text
//! Application (above)  ← builds one service per request/session
//!     ↕
//! Session Layer (this crate)  ← decides who is logged in
//!     ↕
//! Directory + Store Layers (below)  ← credential lookup, session and cache storage
//! ```

mod config;
mod error;
mod password;
mod service;

pub use config::{AuthConfig, PasswordConfig};
pub use error::AuthError;
pub use password::PasswordHasher;
pub use service::{AuthenticationService, LoginOutcome};
