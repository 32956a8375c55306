//! Shared prefix and base64 handling for every k4 format.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::error::{PaserkError, PaserkResult};

pub(crate) const PREFIX_LOCAL: &str = "k4.local.";
pub(crate) const PREFIX_PUBLIC: &str = "k4.public.";
pub(crate) const PREFIX_SECRET: &str = "k4.secret.";
pub(crate) const PREFIX_LID: &str = "k4.lid.";
pub(crate) const PREFIX_PID: &str = "k4.pid.";
pub(crate) const PREFIX_SID: &str = "k4.sid.";
pub(crate) const PREFIX_LOCAL_PW: &str = "k4.local-pw.";
pub(crate) const PREFIX_SECRET_PW: &str = "k4.secret-pw.";
pub(crate) const PREFIX_LOCAL_WRAP: &str = "k4.local-wrap.pie.";
pub(crate) const PREFIX_SECRET_WRAP: &str = "k4.secret-wrap.pie.";
pub(crate) const PREFIX_SEAL: &str = "k4.seal.";

/// Assembles `<prefix><base64url(body)>`.
pub(crate) fn encode(prefix: &str, body: &[u8]) -> String {
    let mut out = String::with_capacity(prefix.len() + body.len() * 4 / 3 + 4);
    out.push_str(prefix);
    out.push_str(&URL_SAFE_NO_PAD.encode(body));
    out
}

/// Strips `prefix` and decodes the remaining body.
pub(crate) fn decode(s: &str, prefix: &'static str) -> PaserkResult<Vec<u8>> {
    let body = s
        .strip_prefix(prefix)
        .ok_or(PaserkError::WrongPrefix { expected: prefix })?;
    if !body.is_ascii() {
        return Err(PaserkError::BadEncoding(
            "key body must be ASCII".to_string(),
        ));
    }
    URL_SAFE_NO_PAD
        .decode(body)
        .map_err(|e| PaserkError::BadEncoding(format!("invalid body base64: {e}")))
}

/// Strips `prefix` and decodes a body of exactly `len` bytes.
pub(crate) fn decode_exact(s: &str, prefix: &'static str, len: usize) -> PaserkResult<Vec<u8>> {
    let body = decode(s, prefix)?;
    if body.len() != len {
        return Err(PaserkError::Truncated);
    }
    Ok(body)
}
