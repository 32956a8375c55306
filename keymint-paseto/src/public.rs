//! Signed (`v4.public`) tokens: Ed25519 over the pre-auth encoding.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use keymint_keys::{SigningPrivateKey, VerifyingPublicKey};

use crate::error::{PasetoError, PasetoResult};
use crate::{pre_auth, token, HEADER_PUBLIC};

/// Length in bytes of the detached signature appended to the payload.
const SIGNATURE_SIZE: usize = 64;

/// Signs `message` into a `v4.public` token.
///
/// `footer` is carried in the clear and bound into the signature;
/// `implicit` is bound into the signature but never carried. Pass empty
/// slices to omit either.
///
/// # Errors
///
/// Returns a key-handle error if `key` has been disposed.
pub fn sign(
    key: &SigningPrivateKey,
    message: &[u8],
    footer: &[u8],
    implicit: &[u8],
) -> PasetoResult<String> {
    let token = key.with_key_bytes(|seed| {
        let seed: [u8; 32] = seed.try_into().expect("signing seed is 32 bytes");
        let signing = SigningKey::from_bytes(&seed);
        let m2 = pre_auth::encode(&[HEADER_PUBLIC.as_bytes(), message, footer, implicit]);
        let sig = signing.sign(&m2);

        let mut body = Vec::with_capacity(message.len() + SIGNATURE_SIZE);
        body.extend_from_slice(message);
        body.extend_from_slice(&sig.to_bytes());
        token::compose(HEADER_PUBLIC, &body, footer)
    })?;
    Ok(token)
}

/// Verifies a `v4.public` token and returns `(message, footer)`.
///
/// `expected_footer = None` accepts whatever footer the token carries;
/// `Some(f)` additionally requires the token's footer to equal `f`.
/// `implicit` must match the value supplied at signing time.
///
/// # Errors
///
/// [`PasetoError::SignatureInvalid`] when the signature does not check out;
/// parse errors per the token grammar.
pub fn verify(
    token: &str,
    key: &VerifyingPublicKey,
    expected_footer: Option<&[u8]>,
    implicit: &[u8],
) -> PasetoResult<(Vec<u8>, Vec<u8>)> {
    let (body, footer) = token::parse(token, HEADER_PUBLIC)?;
    token::check_footer(&footer, expected_footer)?;

    if body.len() < SIGNATURE_SIZE {
        return Err(PasetoError::Truncated);
    }
    let (message, sig_bytes) = body.split_at(body.len() - SIGNATURE_SIZE);
    let sig_bytes: [u8; SIGNATURE_SIZE] =
        sig_bytes.try_into().expect("split leaves 64 signature bytes");
    let signature = Signature::from_bytes(&sig_bytes);

    let verified = key.with_key_bytes(|pk| {
        let pk: [u8; 32] = pk.try_into().expect("public key buffer is 32 bytes");
        let verifying =
            VerifyingKey::from_bytes(&pk).map_err(|_| PasetoError::SignatureInvalid)?;
        let m2 = pre_auth::encode(&[HEADER_PUBLIC.as_bytes(), message, &footer, implicit]);
        verifying
            .verify(&m2, &signature)
            .map_err(|_| PasetoError::SignatureInvalid)
    })?;
    verified?;

    Ok((message.to_vec(), footer))
}
