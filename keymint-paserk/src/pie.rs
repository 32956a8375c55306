//! Symmetric key wrapping: `k4.local-wrap.pie.` and `k4.secret-wrap.pie.`.
//!
//! Wraps key material under another symmetric key. An HMAC-SHA384 split of
//! the wrapping key yields an AES-256-CTR encryption key plus IV and a MAC
//! key; the 48-byte HMAC-SHA384 tag covers the prefix, nonce, and
//! ciphertext through the pre-auth encoding.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha384;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use keymint_keys::{KeyPair, SymmetricKey, KEY_SIZE};
use keymint_paseto::pre_auth;

use crate::error::{PaserkError, PaserkResult};
use crate::format::{self, PREFIX_LOCAL_WRAP, PREFIX_SECRET_WRAP};
use crate::pw::{pair_from_secret_bytes, secret_bytes};

type Aes256Ctr = Ctr128BE<Aes256>;
type HmacSha384 = Hmac<Sha384>;

/// Length of the random nonce inside a wrapped body.
const NONCE_SIZE: usize = 32;

/// Length of the HMAC-SHA384 tag.
const TAG_SIZE: usize = 48;

/// Domain byte for the encryption-key derivation.
const DOMAIN_ENCRYPT: u8 = 0x80;

/// Domain byte for the MAC-key derivation.
const DOMAIN_AUTH: u8 = 0x81;

/// Wraps a symmetric key under `wrapping` as `k4.local-wrap.pie.`.
pub fn wrap_local(key: &SymmetricKey, wrapping: &SymmetricKey) -> PaserkResult<String> {
    let ptk = key.key_bytes()?;
    wrap_bytes(PREFIX_LOCAL_WRAP, &ptk, wrapping)
}

/// Unwraps a `k4.local-wrap.pie.` string with the wrapping key.
///
/// # Errors
///
/// [`PaserkError::AuthFailed`] when the tag does not verify.
pub fn unwrap_local(s: &str, wrapping: &SymmetricKey) -> PaserkResult<SymmetricKey> {
    let ptk = unwrap_bytes(s, PREFIX_LOCAL_WRAP, KEY_SIZE, wrapping)?;
    let bytes: [u8; KEY_SIZE] = ptk[..].try_into().expect("length checked by unwrap");
    Ok(SymmetricKey::from_bytes(bytes))
}

/// Wraps a key pair under `wrapping` as `k4.secret-wrap.pie.`.
pub fn wrap_secret(pair: &KeyPair, wrapping: &SymmetricKey) -> PaserkResult<String> {
    let ptk = secret_bytes(pair)?;
    wrap_bytes(PREFIX_SECRET_WRAP, &ptk, wrapping)
}

/// Unwraps a `k4.secret-wrap.pie.` string back into a key pair.
pub fn unwrap_secret(s: &str, wrapping: &SymmetricKey) -> PaserkResult<KeyPair> {
    let ptk = unwrap_bytes(s, PREFIX_SECRET_WRAP, KEY_SIZE * 2, wrapping)?;
    pair_from_secret_bytes(&ptk)
}

fn wrap_bytes(prefix: &'static str, ptk: &[u8], wrapping: &SymmetricKey) -> PaserkResult<String> {
    let wk = wrapping.key_bytes()?;

    let mut nonce = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce);
    let (ek, iv, ak) = split_wrapping_key(&wk, &nonce);

    let mut ciphertext = ptk.to_vec();
    Aes256Ctr::new_from_slices(&*ek, &iv)
        .expect("fixed key and IV lengths")
        .apply_keystream(&mut ciphertext);

    let tag = auth_tag(&ak, prefix, &nonce, &ciphertext);

    let mut body = Vec::with_capacity(NONCE_SIZE + ciphertext.len() + TAG_SIZE);
    body.extend_from_slice(&nonce);
    body.extend_from_slice(&ciphertext);
    body.extend_from_slice(&tag);
    ciphertext.zeroize();

    Ok(format::encode(prefix, &body))
}

fn unwrap_bytes(
    s: &str,
    prefix: &'static str,
    key_len: usize,
    wrapping: &SymmetricKey,
) -> PaserkResult<Zeroizing<Vec<u8>>> {
    let body = format::decode_exact(s, prefix, NONCE_SIZE + key_len + TAG_SIZE)?;

    let (nonce, rest) = body.split_at(NONCE_SIZE);
    let (ciphertext, tag) = rest.split_at(key_len);
    let nonce: [u8; NONCE_SIZE] = nonce.try_into().expect("length checked");

    let wk = wrapping.key_bytes()?;
    let (ek, iv, ak) = split_wrapping_key(&wk, &nonce);

    let expected_tag = auth_tag(&ak, prefix, &nonce, ciphertext);
    if !bool::from(tag.ct_eq(&expected_tag)) {
        return Err(PaserkError::AuthFailed);
    }

    let mut ptk = Zeroizing::new(ciphertext.to_vec());
    Aes256Ctr::new_from_slices(&*ek, &iv)
        .expect("fixed key and IV lengths")
        .apply_keystream(&mut ptk);
    Ok(ptk)
}

/// Splits the wrapping key into `(AES key, CTR IV, MAC key)` for one nonce.
fn split_wrapping_key(
    wk: &[u8],
    nonce: &[u8; NONCE_SIZE],
) -> (Zeroizing<[u8; 32]>, [u8; 16], Zeroizing<[u8; 48]>) {
    let mut derive = HmacSha384::new_from_slice(wk).expect("HMAC accepts any key length");
    derive.update(&[DOMAIN_ENCRYPT]);
    derive.update(nonce);
    let mut x = derive.finalize().into_bytes();

    let mut ek = Zeroizing::new([0u8; 32]);
    ek.copy_from_slice(&x[..32]);
    let mut iv = [0u8; 16];
    iv.copy_from_slice(&x[32..48]);
    x.as_mut_slice().zeroize();

    let mut derive = HmacSha384::new_from_slice(wk).expect("HMAC accepts any key length");
    derive.update(&[DOMAIN_AUTH]);
    derive.update(nonce);
    let mut ak = Zeroizing::new([0u8; 48]);
    ak.copy_from_slice(&derive.finalize().into_bytes());

    (ek, iv, ak)
}

/// 48-byte HMAC-SHA384 tag over the pre-auth encoding of the wrapped parts.
fn auth_tag(ak: &[u8; 48], prefix: &str, nonce: &[u8; NONCE_SIZE], ciphertext: &[u8]) -> [u8; TAG_SIZE] {
    let pae = pre_auth::encode(&[prefix.as_bytes(), nonce, ciphertext]);
    let mut mac = HmacSha384::new_from_slice(ak).expect("HMAC accepts any key length");
    mac.update(&pae);
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    tag
}
