//! Internal secret buffer shared by all key handles.

use std::fmt;
use std::future::Future;

use zeroize::{Zeroize, Zeroizing};

use crate::error::{KeyError, KeyResult};

/// Algorithm tag carried by every key handle.
///
/// Operations check the tag before touching key bytes and reject handles
/// of the wrong type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Ed25519 signing material (seed, public point, or pair).
    Ed25519,
    /// XChaCha20 symmetric key for encrypted tokens.
    XChaCha20,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519 => f.write_str("ed25519"),
            Self::XChaCha20 => f.write_str("xchacha20"),
        }
    }
}

/// An owned byte buffer that is zeroed on disposal and on drop.
///
/// All key handles wrap one of these. The buffer hands out copies only;
/// the copies are themselves zeroized when dropped.
pub(crate) struct SecretBuffer {
    bytes: Vec<u8>,
    disposed: bool,
}

impl SecretBuffer {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            disposed: false,
        }
    }

    /// Returns an owned copy of the buffer, zeroized when the caller drops it.
    pub(crate) fn copy(&self) -> KeyResult<Zeroizing<Vec<u8>>> {
        if self.disposed {
            return Err(KeyError::Disposed);
        }
        Ok(Zeroizing::new(self.bytes.clone()))
    }

    /// Runs `f` against a temporary copy of the buffer.
    ///
    /// The copy is overwritten when `f` returns, including on panic unwind.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&[u8]) -> R) -> KeyResult<R> {
        let copy = self.copy()?;
        Ok(f(&copy))
    }

    /// Async flavor of [`SecretBuffer::with`]: the closure receives the owned
    /// copy so it can live across await points, and zeroizes it on drop.
    pub(crate) async fn with_async<R, Fut>(
        &self,
        f: impl FnOnce(Zeroizing<Vec<u8>>) -> Fut,
    ) -> KeyResult<R>
    where
        Fut: Future<Output = R>,
    {
        let copy = self.copy()?;
        Ok(f(copy).await)
    }

    /// Zeroes the buffer and marks the handle unusable.
    pub(crate) fn dispose(&mut self) {
        self.bytes.zeroize();
        self.disposed = true;
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Diagnostic hook: whether every byte of the backing buffer is zero.
    pub(crate) fn is_zeroed(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }
}

impl Drop for SecretBuffer {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBuffer")
            .field("bytes", &"[REDACTED]")
            .field("disposed", &self.disposed)
            .finish()
    }
}
