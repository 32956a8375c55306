//! Symmetric key handle for encrypted tokens and key wrapping.

use std::fmt;
use std::future::Future;

use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::KeyResult;
use crate::secret::{KeyType, SecretBuffer};
use crate::KEY_SIZE;

/// A 32-byte XChaCha20 key.
///
/// Used for encrypted (`v4.local`) tokens and as the wrapping key for
/// symmetric key wrapping. The handle exclusively owns its buffer; see the
/// crate docs for the disposal contract.
pub struct SymmetricKey {
    buf: SecretBuffer,
}

impl SymmetricKey {
    /// Generates a fresh random key from the OS RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; KEY_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self {
            buf: SecretBuffer::new(bytes),
        }
    }

    /// Creates a key from raw bytes. The caller's array is copied.
    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self {
            buf: SecretBuffer::new(bytes.to_vec()),
        }
    }

    /// Returns the algorithm tag for this handle.
    #[must_use]
    pub fn key_type(&self) -> KeyType {
        KeyType::XChaCha20
    }

    /// Returns an owned copy of the key bytes, zeroized when dropped.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KeyError::Disposed`] after `dispose`.
    pub fn key_bytes(&self) -> KeyResult<Zeroizing<Vec<u8>>> {
        self.buf.copy()
    }

    /// Runs `f` against a temporary copy of the key bytes.
    ///
    /// The copy is overwritten on every exit path.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KeyError::Disposed`] after `dispose`.
    pub fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> KeyResult<R> {
        self.buf.with(f)
    }

    /// Async flavor of [`SymmetricKey::with_key_bytes`]; the closure owns the
    /// copy so it can live across await points.
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

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("bytes", &"[REDACTED]")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
