//! Password wrapping: `k4.local-pw.` and `k4.secret-pw.`.
//!
//! A wrapping key is derived from the password with Argon2id, the key
//! material is encrypted with XChaCha20 under a random 24-byte nonce, and a
//! keyed-BLAKE2b tag covers the prefix, salt, costs, nonce, and ciphertext
//! through the pre-auth encoding. The salt and costs travel in the clear so
//! the unwrap side can re-derive the wrapping key.

use argon2::{Algorithm, Argon2, Params, Version};
use blake2::Blake2bMac;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::{Key, XChaCha20, XNonce};
use digest::consts::U32;
use digest::Mac;
use rand::RngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use keymint_keys::{KeyPair, Salt, SymmetricKey, KEY_SIZE, MIN_SALT_SIZE};
use keymint_paseto::pre_auth;

use crate::error::{PaserkError, PaserkResult};
use crate::format::{self, PREFIX_LOCAL_PW, PREFIX_SECRET_PW};

/// Length of the XChaCha20 nonce inside a wrapped body.
const NONCE_SIZE: usize = 24;

/// Length of the keyed-BLAKE2b tag.
const TAG_SIZE: usize = 32;

/// Length of the big-endian cost fields (u64 memory, u32 time, u32 lanes).
const COSTS_SIZE: usize = 8 + 4 + 4;

/// Argon2id cost parameters for password wrapping.
///
/// Memory cost is expressed in bytes and must be a positive multiple of
/// 1024. The defaults follow the OWASP Argon2id guidance the rest of the
/// workspace uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrapParams {
    /// Memory cost in bytes (multiple of 1024).
    pub memory_cost: u64,
    /// Iteration count.
    pub time_cost: u32,
    /// Lane count.
    pub parallelism: u32,
}

impl Default for WrapParams {
    fn default() -> Self {
        Self {
            memory_cost: 19 * 1024 * 1024, // 19 MiB
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl WrapParams {
    /// Checks the costs are usable before handing them to Argon2id.
    ///
    /// # Errors
    ///
    /// [`PaserkError::BadParameters`] when a cost is zero, the memory cost
    /// is not 1024-aligned, or it does not fit Argon2's KiB field.
    pub fn validate(&self) -> PaserkResult<()> {
        if self.memory_cost == 0 || self.memory_cost % 1024 != 0 {
            return Err(PaserkError::BadParameters(
                "memory cost must be a positive multiple of 1024 bytes".to_string(),
            ));
        }
        if self.memory_cost / 1024 > u64::from(u32::MAX) {
            return Err(PaserkError::BadParameters(
                "memory cost too large".to_string(),
            ));
        }
        if self.time_cost == 0 {
            return Err(PaserkError::BadParameters(
                "time cost must be positive".to_string(),
            ));
        }
        if self.parallelism == 0 {
            return Err(PaserkError::BadParameters(
                "parallelism must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Wraps a symmetric key under a password as `k4.local-pw.`.
///
/// # Errors
///
/// [`PaserkError::BadParameters`] for unusable costs; key-handle errors if
/// the key has been disposed.
pub fn wrap_local(
    key: &SymmetricKey,
    password: &str,
    salt: &Salt,
    params: &WrapParams,
) -> PaserkResult<String> {
    let ptk = key.key_bytes()?;
    wrap_bytes(PREFIX_LOCAL_PW, &ptk, password, salt, params)
}

/// Unwraps a `k4.local-pw.` string with the password it was wrapped under.
///
/// # Errors
///
/// [`PaserkError::BadPassword`] when the tag does not verify; no key bytes
/// are surfaced on failure.
pub fn unwrap_local(s: &str, password: &str) -> PaserkResult<SymmetricKey> {
    let ptk = unwrap_bytes(s, PREFIX_LOCAL_PW, KEY_SIZE, password)?;
    let bytes: [u8; KEY_SIZE] = ptk[..].try_into().expect("length checked by unwrap");
    Ok(SymmetricKey::from_bytes(bytes))
}

/// Wraps a key pair under a password as `k4.secret-pw.`.
pub fn wrap_secret(
    pair: &KeyPair,
    password: &str,
    salt: &Salt,
    params: &WrapParams,
) -> PaserkResult<String> {
    let ptk = secret_bytes(pair)?;
    wrap_bytes(PREFIX_SECRET_PW, &ptk, password, salt, params)
}

/// Unwraps a `k4.secret-pw.` string back into a key pair.
pub fn unwrap_secret(s: &str, password: &str) -> PaserkResult<KeyPair> {
    let ptk = unwrap_bytes(s, PREFIX_SECRET_PW, KEY_SIZE * 2, password)?;
    pair_from_secret_bytes(&ptk)
}

/// Concatenates seed ‖ public for a pair, zeroized on drop.
pub(crate) fn secret_bytes(pair: &KeyPair) -> PaserkResult<Zeroizing<Vec<u8>>> {
    let seed = pair.signing().key_bytes()?;
    let public = pair.verifying().key_bytes()?;
    let mut bytes = Zeroizing::new(Vec::with_capacity(KEY_SIZE * 2));
    bytes.extend_from_slice(&seed);
    bytes.extend_from_slice(&public);
    Ok(bytes)
}

/// Rebuilds a pair from seed ‖ public bytes, checking the halves agree.
pub(crate) fn pair_from_secret_bytes(bytes: &[u8]) -> PaserkResult<KeyPair> {
    let seed: [u8; KEY_SIZE] = bytes[..KEY_SIZE].try_into().expect("length checked");
    let pair = KeyPair::from_seed(seed);
    let derived = pair.verifying().key_bytes()?;
    if *derived != &bytes[KEY_SIZE..] {
        return Err(PaserkError::BadEncoding(
            "public half does not match the seed".to_string(),
        ));
    }
    Ok(pair)
}

pub(crate) fn wrap_bytes(
    prefix: &'static str,
    ptk: &[u8],
    password: &str,
    salt: &Salt,
    params: &WrapParams,
) -> PaserkResult<String> {
    params.validate()?;
    let wk = derive_wrapping_key(password, salt, params)?;

    let mut nonce = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce);

    let mut ciphertext = ptk.to_vec();
    XChaCha20::new(Key::from_slice(&*wk), XNonce::from_slice(&nonce))
        .apply_keystream(&mut ciphertext);

    let mem_be = params.memory_cost.to_be_bytes();
    let time_be = params.time_cost.to_be_bytes();
    let par_be = params.parallelism.to_be_bytes();
    let pae = pre_auth::encode(&[
        prefix.as_bytes(),
        salt.as_bytes(),
        &mem_be,
        &time_be,
        &par_be,
        &nonce,
        &ciphertext,
    ]);
    let tag = keyed_mac(&wk, &pae);

    let mut body =
        Vec::with_capacity(salt.len() + COSTS_SIZE + NONCE_SIZE + ciphertext.len() + TAG_SIZE);
    body.extend_from_slice(salt.as_bytes());
    body.extend_from_slice(&mem_be);
    body.extend_from_slice(&time_be);
    body.extend_from_slice(&par_be);
    body.extend_from_slice(&nonce);
    body.extend_from_slice(&ciphertext);
    body.extend_from_slice(&tag);
    ciphertext.zeroize();

    Ok(format::encode(prefix, &body))
}

pub(crate) fn unwrap_bytes(
    s: &str,
    prefix: &'static str,
    key_len: usize,
    password: &str,
) -> PaserkResult<Zeroizing<Vec<u8>>> {
    let body = format::decode(s, prefix)?;

    let fixed = COSTS_SIZE + NONCE_SIZE + key_len + TAG_SIZE;
    if body.len() < fixed + MIN_SALT_SIZE {
        return Err(PaserkError::Truncated);
    }
    let salt_len = body.len() - fixed;

    let (salt, rest) = body.split_at(salt_len);
    let (mem_be, rest) = rest.split_at(8);
    let (time_be, rest) = rest.split_at(4);
    let (par_be, rest) = rest.split_at(4);
    let (nonce, rest) = rest.split_at(NONCE_SIZE);
    let (ciphertext, tag) = rest.split_at(key_len);

    let params = WrapParams {
        memory_cost: u64::from_be_bytes(mem_be.try_into().expect("8-byte field")),
        time_cost: u32::from_be_bytes(time_be.try_into().expect("4-byte field")),
        parallelism: u32::from_be_bytes(par_be.try_into().expect("4-byte field")),
    };
    params.validate()?;

    let salt = Salt::from_bytes(salt.to_vec())?;
    let wk = derive_wrapping_key(password, &salt, &params)?;

    let pae = pre_auth::encode(&[
        prefix.as_bytes(),
        salt.as_bytes(),
        mem_be,
        time_be,
        par_be,
        nonce,
        ciphertext,
    ]);
    let expected_tag = keyed_mac(&wk, &pae);
    if !bool::from(tag.ct_eq(&expected_tag)) {
        return Err(PaserkError::BadPassword);
    }

    let mut ptk = Zeroizing::new(ciphertext.to_vec());
    XChaCha20::new(Key::from_slice(&*wk), XNonce::from_slice(nonce))
        .apply_keystream(&mut ptk);
    Ok(ptk)
}

/// Argon2id over the password and salt, producing the 32-byte wrapping key.
fn derive_wrapping_key(
    password: &str,
    salt: &Salt,
    params: &WrapParams,
) -> PaserkResult<Zeroizing<[u8; 32]>> {
    let argon_params = Params::new(
        (params.memory_cost / 1024) as u32,
        params.time_cost,
        params.parallelism,
        Some(32),
    )
    .map_err(|e| PaserkError::BadParameters(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let mut wk = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut *wk)
        .map_err(|e| PaserkError::BadParameters(e.to_string()))?;
    Ok(wk)
}

fn keyed_mac(key: &[u8; 32], message: &[u8]) -> [u8; TAG_SIZE] {
    let mut mac = Blake2bMac::<U32>::new_from_slice(key).expect("32-byte key fits keyed BLAKE2b");
    mac.update(message);
    mac.finalize().into_bytes().into()
}
