//! Owning key handles for keymint.
//!
//! Every key used by the token and wrapping layers is held behind a handle
//! that exclusively owns its byte buffer:
//!
//! - [`SymmetricKey`] — 32-byte XChaCha20 key for encrypted tokens and wrapping
//! - [`SigningPrivateKey`] — 32-byte Ed25519 seed for signing tokens
//! - [`VerifyingPublicKey`] — 32-byte Ed25519 public point
//! - [`KeyPair`] — a signing key together with its verifying key
//! - [`Salt`] — random bytes for password-based key derivation
//!
//! # Design Principles
//!
//! - **Exclusive ownership**: a handle owns its buffer; byte copies handed to
//!   callers are separately owned and zeroized on drop
//! - **Scoped access**: `with_key_bytes` yields a temporary copy that is
//!   overwritten when the closure returns, on every exit path
//! - **Explicit disposal**: `dispose()` zeroes the backing buffer; every
//!   later operation fails with [`KeyError::Disposed`]
//!
//! Handles are not meant to be shared across threads with interleaved
//! disposal. A copy already yielded by `with_key_bytes` is unaffected by a
//! later `dispose` on the handle.

mod asymmetric;
mod error;
mod salt;
mod secret;
mod symmetric;

pub use asymmetric::{KeyPair, SigningPrivateKey, VerifyingPublicKey};
pub use error::{KeyError, KeyResult};
pub use salt::{Salt, MIN_SALT_SIZE};
pub use secret::KeyType;
pub use symmetric::SymmetricKey;

/// Size in bytes of every k4 key (symmetric key, Ed25519 seed, public point).
pub const KEY_SIZE: usize = 32;
