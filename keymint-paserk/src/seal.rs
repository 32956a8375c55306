//! Sealing: `k4.seal.` — send a symmetric key to the holder of an Ed25519
//! key pair.
//!
//! The recipient's Ed25519 public key is mapped to its birationally
//! equivalent X25519 key; an ephemeral X25519 pair produces a shared secret,
//! from which BLAKE2b derives an encryption key, nonce, and authentication
//! key. Only the full key pair (the seed, converted through SHA-512
//! clamping) can recompute the shared secret and unseal.

use blake2::{Blake2b, Blake2bMac};
use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::{Key, XChaCha20, XNonce};
use digest::consts::{U24, U32};
use digest::{Digest, Mac};
use ed25519_dalek::VerifyingKey as DalekVerifyingKey;
use rand::rngs::OsRng;
use sha2::Sha512;
use subtle::ConstantTimeEq;
use x25519_dalek::{EphemeralSecret, PublicKey, StaticSecret};
use zeroize::{Zeroize, Zeroizing};

use keymint_keys::{KeyError, KeyPair, SymmetricKey, VerifyingPublicKey, KEY_SIZE};

use crate::error::{PaserkError, PaserkResult};
use crate::format::{self, PREFIX_SEAL};

/// Domain byte for the encryption-key derivation.
const DOMAIN_ENCRYPT: u8 = 0x01;

/// Domain byte for the authentication-key derivation.
const DOMAIN_AUTH: u8 = 0x02;

/// Total sealed body: ephemeral public ‖ encrypted key ‖ tag.
const BODY_SIZE: usize = 32 + KEY_SIZE + 32;

/// Seals a symmetric key to the holder of `recipient`'s key pair.
///
/// # Errors
///
/// Key-handle errors if either handle has been disposed.
pub fn seal(key: &SymmetricKey, recipient: &VerifyingPublicKey) -> PaserkResult<String> {
    let xpk_bytes = recipient.with_key_bytes(|pk| {
        let pk: [u8; 32] = pk.try_into().expect("public key buffer is 32 bytes");
        let vk = DalekVerifyingKey::from_bytes(&pk).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok::<_, PaserkError>(vk.to_montgomery().to_bytes())
    })??;
    let xpk = PublicKey::from(xpk_bytes);

    let esk = EphemeralSecret::random_from_rng(OsRng);
    let epk = PublicKey::from(&esk);
    let shared = esk.diffie_hellman(&xpk);

    let (ek, nonce, ak) = derive_keys(shared.as_bytes(), epk.as_bytes(), xpk.as_bytes());

    let mut ciphertext = [0u8; KEY_SIZE];
    key.with_key_bytes(|k| ciphertext.copy_from_slice(k))?;
    XChaCha20::new(Key::from_slice(&*ek), XNonce::from_slice(&nonce))
        .apply_keystream(&mut ciphertext);

    let tag = auth_tag(&ak, epk.as_bytes(), &ciphertext);

    let mut body = Vec::with_capacity(BODY_SIZE);
    body.extend_from_slice(epk.as_bytes());
    body.extend_from_slice(&ciphertext);
    body.extend_from_slice(&tag);

    Ok(format::encode(PREFIX_SEAL, &body))
}

/// Unseals a `k4.seal.` string with the recipient's full key pair.
///
/// # Errors
///
/// [`PaserkError::AuthFailed`] when the pair cannot authenticate the sealed
/// body; no key bytes are surfaced on failure.
pub fn unseal(s: &str, pair: &KeyPair) -> PaserkResult<SymmetricKey> {
    let body = format::decode_exact(s, PREFIX_SEAL, BODY_SIZE)?;
    let epk_bytes: [u8; 32] = body[..32].try_into().expect("length checked");
    let ciphertext = &body[32..32 + KEY_SIZE];
    let tag = &body[32 + KEY_SIZE..];

    let xsk_bytes = pair.signing().with_key_bytes(|seed| {
        // The X25519 secret is the clamped lower half of SHA-512(seed),
        // matching how Ed25519 expands its scalar.
        let mut digest = Sha512::new();
        digest.update(seed);
        let mut expanded = digest.finalize();
        let mut out = Zeroizing::new([0u8; 32]);
        out.copy_from_slice(&expanded[..32]);
        expanded.as_mut_slice().zeroize();
        out
    })?;
    let xsk = StaticSecret::from(*xsk_bytes);
    let xpk = PublicKey::from(&xsk);
    let epk = PublicKey::from(epk_bytes);
    let shared = xsk.diffie_hellman(&epk);

    let (ek, nonce, ak) = derive_keys(shared.as_bytes(), epk.as_bytes(), xpk.as_bytes());

    let expected_tag = auth_tag(&ak, epk.as_bytes(), ciphertext);
    if !bool::from(tag.ct_eq(&expected_tag)) {
        return Err(PaserkError::AuthFailed);
    }

    let mut key_bytes: [u8; KEY_SIZE] = ciphertext.try_into().expect("length checked");
    XChaCha20::new(Key::from_slice(&*ek), XNonce::from_slice(&nonce))
        .apply_keystream(&mut key_bytes);
    let key = SymmetricKey::from_bytes(key_bytes);
    key_bytes.zeroize();
    Ok(key)
}

/// Derives `(encryption key, nonce, auth key)` from the KEM outputs.
fn derive_keys(
    shared: &[u8],
    epk: &[u8],
    xpk: &[u8],
) -> (Zeroizing<[u8; 32]>, [u8; 24], Zeroizing<[u8; 32]>) {
    let mut ek = Zeroizing::new([0u8; 32]);
    ek.copy_from_slice(
        &Blake2b::<U32>::new()
            .chain_update([DOMAIN_ENCRYPT])
            .chain_update(PREFIX_SEAL.as_bytes())
            .chain_update(shared)
            .chain_update(epk)
            .chain_update(xpk)
            .finalize(),
    );

    let mut ak = Zeroizing::new([0u8; 32]);
    ak.copy_from_slice(
        &Blake2b::<U32>::new()
            .chain_update([DOMAIN_AUTH])
            .chain_update(PREFIX_SEAL.as_bytes())
            .chain_update(shared)
            .chain_update(epk)
            .chain_update(xpk)
            .finalize(),
    );

    let mut nonce = [0u8; 24];
    nonce.copy_from_slice(
        &Blake2b::<U24>::new()
            .chain_update(epk)
            .chain_update(xpk)
            .finalize(),
    );

    (ek, nonce, ak)
}

/// Keyed-BLAKE2b tag over prefix, ephemeral public key, and ciphertext.
fn auth_tag(ak: &[u8; 32], epk: &[u8], ciphertext: &[u8]) -> [u8; 32] {
    let mut mac = Blake2bMac::<U32>::new_from_slice(ak).expect("32-byte key fits keyed BLAKE2b");
    mac.update(PREFIX_SEAL.as_bytes());
    mac.update(epk);
    mac.update(ciphertext);
    mac.finalize().into_bytes().into()
}
