//! Ed25519 signing and verifying key handles.

use std::fmt;
use std::future::Future;

use ed25519_dalek::SigningKey as DalekSigningKey;
use ed25519_dalek::VerifyingKey as DalekVerifyingKey;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::error::{KeyError, KeyResult};
use crate::secret::{KeyType, SecretBuffer};
use crate::KEY_SIZE;

/// A 32-byte Ed25519 seed used to sign tokens.
///
/// The 64-byte expanded form is derived on demand by consumers and never
/// stored here.
pub struct SigningPrivateKey {
    buf: SecretBuffer,
}

impl SigningPrivateKey {
    /// Creates a signing key from a raw 32-byte seed.
    #[must_use]
    pub fn from_seed(seed: [u8; KEY_SIZE]) -> Self {
        Self {
            buf: SecretBuffer::new(seed.to_vec()),
        }
    }

    /// Returns the algorithm tag for this handle.
    #[must_use]
    pub fn key_type(&self) -> KeyType {
        KeyType::Ed25519
    }

    /// Derives the matching verifying key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Disposed`] after `dispose`.
    pub fn verifying_key(&self) -> KeyResult<VerifyingPublicKey> {
        self.buf.with(|seed| {
            let seed: [u8; KEY_SIZE] = seed.try_into().expect("seed buffer is 32 bytes");
            let vk = DalekSigningKey::from_bytes(&seed).verifying_key();
            VerifyingPublicKey {
                buf: SecretBuffer::new(vk.to_bytes().to_vec()),
            }
        })
    }

    /// Returns an owned copy of the seed, zeroized when dropped.
    pub fn key_bytes(&self) -> KeyResult<Zeroizing<Vec<u8>>> {
        self.buf.copy()
    }

    /// Runs `f` against a temporary copy of the seed.
    pub fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> KeyResult<R> {
        self.buf.with(f)
    }

    /// Async flavor of [`SigningPrivateKey::with_key_bytes`].
    pub async fn with_key_bytes_async<R, Fut>(
        &self,
        f: impl FnOnce(Zeroizing<Vec<u8>>) -> Fut,
    ) -> KeyResult<R>
    where
        Fut: Future<Output = R>,
    {
        self.buf.with_async(f).await
    }

    /// Zeroes the backing buffer; all later operations fail.
    pub fn dispose(&mut self) {
        self.buf.dispose();
    }

    /// Whether this handle has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.buf.is_disposed()
    }

    /// Diagnostic hook: whether the backing buffer is all zeros.
    #[must_use]
    pub fn buffer_is_zeroed(&self) -> bool {
        self.buf.is_zeroed()
    }
}

impl fmt::Debug for SigningPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningPrivateKey")
            .field("seed", &"[REDACTED]")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// A 32-byte Ed25519 public point used to verify token signatures.
pub struct VerifyingPublicKey {
    buf: SecretBuffer,
}

impl VerifyingPublicKey {
    /// Creates a verifying key from raw bytes, checking the point decodes.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidPublicKey`] if the bytes are not a valid
    /// compressed Edwards point.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> KeyResult<Self> {
        DalekVerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self {
            buf: SecretBuffer::new(bytes.to_vec()),
        })
    }

    /// Returns the algorithm tag for this handle.
    #[must_use]
    pub fn key_type(&self) -> KeyType {
        KeyType::Ed25519
    }

    /// Returns an owned copy of the public bytes.
    pub fn key_bytes(&self) -> KeyResult<Zeroizing<Vec<u8>>> {
        self.buf.copy()
    }

    /// Runs `f` against a temporary copy of the public bytes.
    pub fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> KeyResult<R> {
        self.buf.with(f)
    }

    /// Async flavor of [`VerifyingPublicKey::with_key_bytes`].
    pub async fn with_key_bytes_async<R, Fut>(
        &self,
        f: impl FnOnce(Zeroizing<Vec<u8>>) -> Fut,
    ) -> KeyResult<R>
    where
        Fut: Future<Output = R>,
    {
        self.buf.with_async(f).await
    }

    /// Zeroes the backing buffer; all later operations fail.
    pub fn dispose(&mut self) {
        self.buf.dispose();
    }

    /// Whether this handle has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.buf.is_disposed()
    }

    /// Diagnostic hook: whether the backing buffer is all zeros.
    #[must_use]
    pub fn buffer_is_zeroed(&self) -> bool {
        self.buf.is_zeroed()
    }
}

impl fmt::Debug for VerifyingPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyingPublicKey")
            .field("bytes", &"[REDACTED]")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// An Ed25519 signing key together with its verifying key.
///
/// The pair exclusively owns both sub-handles; disposing the pair disposes
/// both.
pub struct KeyPair {
    signing: SigningPrivateKey,
    verifying: VerifyingPublicKey,
}

impl KeyPair {
    /// Generates a fresh random pair from the OS RNG.
    #[must_use]
    pub fn generate() -> Self {
        let sk = DalekSigningKey::generate(&mut OsRng);
        let vk = sk.verifying_key();
        Self {
            signing: SigningPrivateKey::from_seed(sk.to_bytes()),
            verifying: VerifyingPublicKey {
                buf: SecretBuffer::new(vk.to_bytes().to_vec()),
            },
        }
    }

    /// Rebuilds a pair from a raw 32-byte seed.
    #[must_use]
    pub fn from_seed(seed: [u8; KEY_SIZE]) -> Self {
        let sk = DalekSigningKey::from_bytes(&seed);
        let vk = sk.verifying_key();
        Self {
            signing: SigningPrivateKey::from_seed(seed),
            verifying: VerifyingPublicKey {
                buf: SecretBuffer::new(vk.to_bytes().to_vec()),
            },
        }
    }

    /// Returns the signing half.
    #[must_use]
    pub fn signing(&self) -> &SigningPrivateKey {
        &self.signing
    }

    /// Returns the verifying half.
    #[must_use]
    pub fn verifying(&self) -> &VerifyingPublicKey {
        &self.verifying
    }

    /// Whether both halves carry Ed25519 material.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.signing.key_type() == KeyType::Ed25519
            && self.verifying.key_type() == KeyType::Ed25519
    }

    /// Disposes both halves.
    pub fn dispose(&mut self) {
        self.signing.dispose();
        self.verifying.dispose();
    }

    /// Whether either half has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.signing.is_disposed() || self.verifying.is_disposed()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("signing", &self.signing)
            .field("verifying", &self.verifying)
            .finish()
    }
}
