//! Encrypted (`v4.local`) tokens: XChaCha20 with a keyed-BLAKE2b MAC.
//!
//! Follows the upstream v4 construction exactly: the 32-byte symmetric key
//! is split per-token into an encryption key, a counter nonce, and an
//! authentication key via keyed BLAKE2b over a 32-byte random nonce, and the
//! tag covers header, nonce, ciphertext, footer, and implicit assertion
//! through the pre-auth encoding.

use blake2::Blake2bMac;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::{Key, XChaCha20, XNonce};
use digest::consts::{U32, U56};
use digest::Mac;
use rand::RngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use keymint_keys::SymmetricKey;

use crate::error::{PasetoError, PasetoResult};
use crate::{pre_auth, token, HEADER_LOCAL};

/// Domain-separation info for the encryption half of the key split.
const ENCRYPTION_KEY_INFO: &[u8] = b"paseto-encryption-key";

/// Domain-separation info for the authentication half of the key split.
const AUTH_KEY_INFO: &[u8] = b"paseto-auth-key-for-aead";

/// Length of the per-token random nonce.
const NONCE_SIZE: usize = 32;

/// Length of the BLAKE2b authentication tag.
const TAG_SIZE: usize = 32;

/// Encrypts `message` into a `v4.local` token with a random nonce.
///
/// `footer` is carried in the clear and authenticated; `implicit` is
/// authenticated but never carried. Pass empty slices to omit either.
///
/// # Errors
///
/// Returns a key-handle error if `key` has been disposed.
pub fn encrypt(
    key: &SymmetricKey,
    message: &[u8],
    footer: &[u8],
    implicit: &[u8],
) -> PasetoResult<String> {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce);
    encrypt_with_nonce(key, &nonce, message, footer, implicit)
}

/// Deterministic encryption entry point for known-answer vectors.
#[doc(hidden)]
pub fn encrypt_with_nonce(
    key: &SymmetricKey,
    nonce: &[u8; NONCE_SIZE],
    message: &[u8],
    footer: &[u8],
    implicit: &[u8],
) -> PasetoResult<String> {
    let token = key.with_key_bytes(|k| {
        let (ek, n2, ak) = split_key(k, nonce);

        let mut ciphertext = message.to_vec();
        XChaCha20::new(Key::from_slice(&*ek), XNonce::from_slice(&n2))
            .apply_keystream(&mut ciphertext);

        let pae = pre_auth::encode(&[
            HEADER_LOCAL.as_bytes(),
            nonce,
            &ciphertext,
            footer,
            implicit,
        ]);
        let tag = keyed_mac(&ak, &pae);

        let mut body = Vec::with_capacity(NONCE_SIZE + ciphertext.len() + TAG_SIZE);
        body.extend_from_slice(nonce);
        body.extend_from_slice(&ciphertext);
        body.extend_from_slice(&tag);
        token::compose(HEADER_LOCAL, &body, footer)
    })?;
    Ok(token)
}

/// Decrypts a `v4.local` token and returns `(message, footer)`.
///
/// `expected_footer = None` accepts whatever footer the token carries;
/// `Some(f)` additionally requires the token's footer to equal `f`.
/// `implicit` must match the value supplied at encryption time.
///
/// # Errors
///
/// [`PasetoError::AuthFailed`] when the tag does not verify; parse errors
/// per the token grammar.
pub fn decrypt(
    token: &str,
    key: &SymmetricKey,
    expected_footer: Option<&[u8]>,
    implicit: &[u8],
) -> PasetoResult<(Vec<u8>, Vec<u8>)> {
    let (body, footer) = token::parse(token, HEADER_LOCAL)?;
    token::check_footer(&footer, expected_footer)?;

    if body.len() < NONCE_SIZE + TAG_SIZE {
        return Err(PasetoError::Truncated);
    }
    let nonce: [u8; NONCE_SIZE] = body[..NONCE_SIZE]
        .try_into()
        .expect("length checked above");
    let ciphertext = &body[NONCE_SIZE..body.len() - TAG_SIZE];
    let tag = &body[body.len() - TAG_SIZE..];

    let message = key.with_key_bytes(|k| {
        let (ek, n2, ak) = split_key(k, &nonce);

        let pae = pre_auth::encode(&[
            HEADER_LOCAL.as_bytes(),
            &nonce,
            ciphertext,
            &footer,
            implicit,
        ]);
        let expected_tag = keyed_mac(&ak, &pae);
        if !bool::from(tag.ct_eq(&expected_tag)) {
            return Err(PasetoError::AuthFailed);
        }

        let mut message = ciphertext.to_vec();
        XChaCha20::new(Key::from_slice(&*ek), XNonce::from_slice(&n2))
            .apply_keystream(&mut message);
        Ok(message)
    })??;

    Ok((message, footer))
}

/// Splits the symmetric key into `(encryption key, counter nonce, auth key)`
/// for one token.
fn split_key(
    key: &[u8],
    nonce: &[u8; NONCE_SIZE],
) -> (Zeroizing<[u8; 32]>, [u8; 24], Zeroizing<[u8; 32]>) {
    let mut ek_split =
        Blake2bMac::<U56>::new_from_slice(key).expect("32-byte key fits keyed BLAKE2b");
    ek_split.update(ENCRYPTION_KEY_INFO);
    ek_split.update(nonce);
    let mut tmp = ek_split.finalize().into_bytes();

    let mut ek = Zeroizing::new([0u8; 32]);
    ek.copy_from_slice(&tmp[..32]);
    let mut n2 = [0u8; 24];
    n2.copy_from_slice(&tmp[32..56]);
    tmp.as_mut_slice().zeroize();

    let mut ak_split =
        Blake2bMac::<U32>::new_from_slice(key).expect("32-byte key fits keyed BLAKE2b");
    ak_split.update(AUTH_KEY_INFO);
    ak_split.update(nonce);
    let mut ak = Zeroizing::new([0u8; 32]);
    ak.copy_from_slice(&ak_split.finalize().into_bytes());

    (ek, n2, ak)
}

/// 32-byte keyed-BLAKE2b tag.
fn keyed_mac(key: &[u8; 32], message: &[u8]) -> [u8; TAG_SIZE] {
    let mut mac = Blake2bMac::<U32>::new_from_slice(key).expect("32-byte key fits keyed BLAKE2b");
    mac.update(message);
    mac.finalize().into_bytes().into()
}
