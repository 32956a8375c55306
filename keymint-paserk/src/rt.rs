//! Task-returning variants of the CPU-bound operations.
//!
//! Argon2id derivation and X25519 scalar multiplication can take long
//! enough to matter on an async executor, so these wrappers move the work
//! onto `tokio`'s blocking pool. Cancellation is abandonment: dropping the
//! returned future leaves no partial state behind.

use zeroize::Zeroize;

use keymint_keys::{KeyPair, Salt, SymmetricKey, VerifyingPublicKey};

use crate::error::{PaserkError, PaserkResult};
use crate::format::{PREFIX_LOCAL_PW, PREFIX_SECRET_PW};
use crate::pw::{self, WrapParams};
use crate::seal;

/// Async [`crate::pw::wrap_local`].
pub async fn wrap_local(
    key: &SymmetricKey,
    password: &str,
    salt: &Salt,
    params: &WrapParams,
) -> PaserkResult<String> {
    let ptk = key.key_bytes()?;
    let password = password.to_owned();
    let salt = salt.clone();
    let params = params.clone();
    spawn(move || pw::wrap_bytes(PREFIX_LOCAL_PW, &ptk, &password, &salt, &params)).await
}

/// Async [`crate::pw::unwrap_local`].
pub async fn unwrap_local(s: &str, password: &str) -> PaserkResult<SymmetricKey> {
    let s = s.to_owned();
    let password = password.to_owned();
    spawn(move || pw::unwrap_local(&s, &password)).await
}

/// Async [`crate::pw::wrap_secret`].
pub async fn wrap_secret(
    pair: &KeyPair,
    password: &str,
    salt: &Salt,
    params: &WrapParams,
) -> PaserkResult<String> {
    let ptk = pw::secret_bytes(pair)?;
    let password = password.to_owned();
    let salt = salt.clone();
    let params = params.clone();
    spawn(move || pw::wrap_bytes(PREFIX_SECRET_PW, &ptk, &password, &salt, &params)).await
}

/// Async [`crate::pw::unwrap_secret`].
pub async fn unwrap_secret(s: &str, password: &str) -> PaserkResult<KeyPair> {
    let s = s.to_owned();
    let password = password.to_owned();
    spawn(move || pw::unwrap_secret(&s, &password)).await
}

/// Async [`crate::seal::seal`].
pub async fn seal(key: &SymmetricKey, recipient: &VerifyingPublicKey) -> PaserkResult<String> {
    let key_bytes: [u8; 32] = key.key_bytes()?[..]
        .try_into()
        .expect("symmetric key buffer is 32 bytes");
    let public: [u8; 32] = recipient.key_bytes()?[..]
        .try_into()
        .expect("public key buffer is 32 bytes");
    spawn(move || {
        let key = SymmetricKey::from_bytes(key_bytes);
        let mut key_bytes = key_bytes;
        key_bytes.zeroize();
        let recipient = VerifyingPublicKey::from_bytes(public)?;
        seal::seal(&key, &recipient)
    })
    .await
}

/// Async [`crate::seal::unseal`].
pub async fn unseal(s: &str, pair: &KeyPair) -> PaserkResult<SymmetricKey> {
    let seed: [u8; 32] = pair.signing().key_bytes()?[..]
        .try_into()
        .expect("signing seed buffer is 32 bytes");
    let s = s.to_owned();
    spawn(move || {
        let pair = KeyPair::from_seed(seed);
        let mut seed = seed;
        seed.zeroize();
        seal::unseal(&s, &pair)
    })
    .await
}

async fn spawn<T: Send + 'static>(
    f: impl FnOnce() -> PaserkResult<T> + Send + 'static,
) -> PaserkResult<T> {
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PaserkError::Runtime(e.to_string()))?
}
