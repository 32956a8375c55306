//! Pre-auth encoding: the canonical serializer bound into every signature
//! and MAC.
//!
//! `encode([m1, …, mn])` produces
//! `LE64(n) ‖ LE64(|m1|) ‖ m1 ‖ … ‖ LE64(|mn|) ‖ mn`, where `LE64` is an
//! unsigned 64-bit little-endian encoding with the top bit cleared. The
//! encoding is injective over lists of byte strings, which is what makes it
//! safe to MAC the concatenation of header, nonce, ciphertext, footer, and
//! implicit assertion without ambiguity.

/// Encodes `pieces` into a single unambiguous byte string.
#[must_use]
pub fn encode(pieces: &[&[u8]]) -> Vec<u8> {
    let total: usize = pieces.iter().map(|p| 8 + p.len()).sum();
    let mut out = Vec::with_capacity(8 + total);
    out.extend_from_slice(&le64(pieces.len() as u64));
    for piece in pieces {
        out.extend_from_slice(&le64(piece.len() as u64));
        out.extend_from_slice(piece);
    }
    out
}

/// Unsigned 64-bit little-endian with the most significant bit cleared.
fn le64(n: u64) -> [u8; 8] {
    (n & !(1 << 63)).to_le_bytes()
}
