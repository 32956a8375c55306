//! PASETO v4 token engine.
//!
//! Implements the two v4 purposes over the key handles from `keymint-keys`:
//!
//! - [`public`] — signed tokens: Ed25519 over the pre-auth encoding
//! - [`local`] — encrypted tokens: XChaCha20 with a keyed-BLAKE2b MAC
//!   (encrypt-then-MAC)
//!
//! Token strings have the shape
//! `v4.<purpose>.<base64url(body)>[.<base64url(footer)>]` with unpadded
//! url-safe base64. The optional footer and an optional implicit assertion
//! (caller-supplied context that never appears in the token) are both bound
//! into the signature / MAC through the pre-auth encoding ([`pre_auth`]).

mod error;
pub mod local;
pub mod pre_auth;
pub mod public;
mod token;

pub use error::{PasetoError, PasetoResult};

/// Header of signed tokens.
pub const HEADER_PUBLIC: &str = "v4.public.";

/// Header of encrypted tokens.
pub const HEADER_LOCAL: &str = "v4.local.";
