//! Key fingerprints: `k4.lid.`, `k4.pid.`, `k4.sid.`.
//!
//! A fingerprint is `base64url(SHA-384(id-prefix ‖ key-paserk-string)[..33])`.
//! It is deterministic in the key bytes and not reversible, so it is safe to
//! put in logs, footers, and key-management metadata.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use sha2::{Digest, Sha384};

use keymint_keys::{KeyPair, SymmetricKey, VerifyingPublicKey};

use crate::error::PaserkResult;
use crate::format::{PREFIX_LID, PREFIX_PID, PREFIX_SID};
use crate::plain;

/// Truncated length of the SHA-384 digest inside an identifier.
const ID_DIGEST_SIZE: usize = 33;

/// Fingerprint of a symmetric key (`k4.lid.`).
pub fn lid(key: &SymmetricKey) -> PaserkResult<String> {
    let paserk = plain::encode_local(key)?;
    Ok(derive(PREFIX_LID, &paserk))
}

/// Fingerprint of a verifying key (`k4.pid.`).
pub fn pid(key: &VerifyingPublicKey) -> PaserkResult<String> {
    let paserk = plain::encode_public(key)?;
    Ok(derive(PREFIX_PID, &paserk))
}

/// Fingerprint of a key pair (`k4.sid.`).
pub fn sid(pair: &KeyPair) -> PaserkResult<String> {
    let paserk = plain::encode_secret(pair)?;
    Ok(derive(PREFIX_SID, &paserk))
}

fn derive(prefix: &str, key_paserk: &str) -> String {
    let mut hasher = Sha384::new();
    hasher.update(prefix.as_bytes());
    hasher.update(key_paserk.as_bytes());
    let digest = hasher.finalize();
    format!(
        "{prefix}{}",
        URL_SAFE_NO_PAD.encode(&digest[..ID_DIGEST_SIZE])
    )
}
