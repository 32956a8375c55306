//! Plain (unwrapped) k4 serializations of key material.
//!
//! `k4.local.` and `k4.secret.` expose raw secrets; they exist for transport
//! into a wrapping or sealing step, or for storage the caller has already
//! secured.

use keymint_keys::{KeyPair, SymmetricKey, VerifyingPublicKey, KEY_SIZE};
use zeroize::Zeroize;

use crate::error::{PaserkError, PaserkResult};
use crate::format::{self, PREFIX_LOCAL, PREFIX_PUBLIC, PREFIX_SECRET};

/// Serializes a symmetric key as `k4.local.`.
///
/// # Errors
///
/// Returns a key-handle error if the key has been disposed.
pub fn encode_local(key: &SymmetricKey) -> PaserkResult<String> {
    let s = key.with_key_bytes(|k| format::encode(PREFIX_LOCAL, k))?;
    Ok(s)
}

/// Parses a `k4.local.` string back into a symmetric key.
pub fn decode_local(s: &str) -> PaserkResult<SymmetricKey> {
    let mut body = format::decode_exact(s, PREFIX_LOCAL, KEY_SIZE)?;
    let bytes: [u8; KEY_SIZE] = body[..].try_into().expect("length checked");
    body.zeroize();
    Ok(SymmetricKey::from_bytes(bytes))
}

/// Serializes a verifying key as `k4.public.`.
pub fn encode_public(key: &VerifyingPublicKey) -> PaserkResult<String> {
    let s = key.with_key_bytes(|k| format::encode(PREFIX_PUBLIC, k))?;
    Ok(s)
}

/// Parses a `k4.public.` string back into a verifying key.
///
/// # Errors
///
/// [`PaserkError::BadEncoding`] if the bytes are not a valid Ed25519 point.
pub fn decode_public(s: &str) -> PaserkResult<VerifyingPublicKey> {
    let body = format::decode_exact(s, PREFIX_PUBLIC, KEY_SIZE)?;
    let bytes: [u8; KEY_SIZE] = body[..].try_into().expect("length checked");
    let key = VerifyingPublicKey::from_bytes(bytes)?;
    Ok(key)
}

/// Serializes a key pair as `k4.secret.` (seed ‖ public key).
pub fn encode_secret(pair: &KeyPair) -> PaserkResult<String> {
    let s = pair.signing().with_key_bytes(|seed| {
        pair.verifying().with_key_bytes(|public| {
            let mut body = Vec::with_capacity(KEY_SIZE * 2);
            body.extend_from_slice(seed);
            body.extend_from_slice(public);
            let s = format::encode(PREFIX_SECRET, &body);
            body.zeroize();
            s
        })
    })??;
    Ok(s)
}

/// Parses a `k4.secret.` string back into a key pair.
///
/// The embedded public half must match the one derived from the seed.
pub fn decode_secret(s: &str) -> PaserkResult<KeyPair> {
    let mut body = format::decode_exact(s, PREFIX_SECRET, KEY_SIZE * 2)?;
    let seed: [u8; KEY_SIZE] = body[..KEY_SIZE].try_into().expect("length checked");
    let public = &body[KEY_SIZE..];

    let pair = KeyPair::from_seed(seed);
    let derived = pair.verifying().key_bytes()?;
    if *derived != public {
        body.zeroize();
        return Err(PaserkError::BadEncoding(
            "public half does not match the seed".to_string(),
        ));
    }
    body.zeroize();
    Ok(pair)
}
