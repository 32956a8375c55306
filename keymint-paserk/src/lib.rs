//! PASERK k4 key lifecycle: serialization, fingerprints, wrapping, sealing.
//!
//! Every format is an ASCII string `<prefix><base64url(body)>` with a fixed
//! prefix that identifies the layout:
//!
//! | Prefix | Contents |
//! |---|---|
//! | `k4.local.` | plain 32-byte symmetric key |
//! | `k4.public.` | plain 32-byte Ed25519 public key |
//! | `k4.secret.` | 64 bytes: Ed25519 seed ‖ public key |
//! | `k4.lid.` / `k4.pid.` / `k4.sid.` | truncated-SHA-384 fingerprint |
//! | `k4.local-pw.` / `k4.secret-pw.` | password-wrapped key (Argon2id) |
//! | `k4.local-wrap.pie.` / `k4.secret-wrap.pie.` | key wrapped by a symmetric key |
//! | `k4.seal.` | key sealed to an Ed25519 recipient (X25519 KEM) |
//!
//! Wrapped and sealed bodies end with their authentication tag; the tag is
//! always verified in constant time before any key bytes are surfaced.
//!
//! The `rt` feature adds [`rt`], task-returning variants of the Argon2id-
//! and X25519-heavy operations that run them on a blocking executor.

mod error;
mod format;
pub mod identifier;
pub mod pie;
pub mod plain;
pub mod pw;
#[cfg(feature = "rt")]
pub mod rt;
pub mod seal;

pub use error::{PaserkError, PaserkResult};
pub use pw::WrapParams;
