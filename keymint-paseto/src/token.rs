//! Token string composition and parsing.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use subtle::ConstantTimeEq;

use crate::error::{PasetoError, PasetoResult};

/// Assembles `<header><base64url(body)>[.<base64url(footer)>]`.
pub(crate) fn compose(header: &str, body: &[u8], footer: &[u8]) -> String {
    let mut token = String::with_capacity(header.len() + body.len() * 4 / 3 + 4);
    token.push_str(header);
    token.push_str(&URL_SAFE_NO_PAD.encode(body));
    if !footer.is_empty() {
        token.push('.');
        token.push_str(&URL_SAFE_NO_PAD.encode(footer));
    }
    token
}

/// Splits and decodes a token, returning `(body, footer)`.
///
/// The header must match exactly; any other version/purpose combination is
/// rejected before looking at the body.
pub(crate) fn parse(token: &str, header: &str) -> PasetoResult<(Vec<u8>, Vec<u8>)> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(PasetoError::BadEncoding(
            "token must have three or four dot-separated sections".to_string(),
        ));
    }

    let found_header = format!("{}.{}.", parts[0], parts[1]);
    if found_header != header {
        return Err(PasetoError::BadVersion {
            found: format!("{}.{}", parts[0], parts[1]),
        });
    }

    let body = URL_SAFE_NO_PAD
        .decode(parts[2])
        .map_err(|e| PasetoError::BadEncoding(format!("invalid body base64: {e}")))?;

    let footer = match parts.get(3) {
        Some(f) => URL_SAFE_NO_PAD
            .decode(f)
            .map_err(|e| PasetoError::BadEncoding(format!("invalid footer base64: {e}")))?,
        None => Vec::new(),
    };

    Ok((body, footer))
}

/// Applies the caller's footer expectation to the token's footer.
///
/// `None` accepts whatever the token carries; `Some(f)` requires an exact
/// match. The comparison is constant time since footers may carry key
/// identifiers.
pub(crate) fn check_footer(token_footer: &[u8], expected: Option<&[u8]>) -> PasetoResult<()> {
    if let Some(expected) = expected {
        if !bool::from(token_footer.ct_eq(expected)) {
            return Err(PasetoError::FooterMismatch);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_without_footer() {
        let token = compose("v4.local.", &[1, 2, 3], b"");
        assert_eq!(token, format!("v4.local.{}", URL_SAFE_NO_PAD.encode([1, 2, 3])));
    }

    #[test]
    fn parse_rejects_wrong_header() {
        let token = compose("v4.local.", &[1, 2, 3], b"");
        let err = parse(&token, "v4.public.").unwrap_err();
        assert!(matches!(err, PasetoError::BadVersion { .. }));
    }

    #[test]
    fn parse_roundtrips_footer() {
        let token = compose("v4.public.", b"body", b"kid:1");
        let (body, footer) = parse(&token, "v4.public.").unwrap();
        assert_eq!(body, b"body");
        assert_eq!(footer, b"kid:1");
    }

    #[test]
    fn parse_rejects_garbage_base64() {
        let err = parse("v4.local.!!!", "v4.local.").unwrap_err();
        assert!(matches!(err, PasetoError::BadEncoding(_)));
    }

    #[test]
    fn footer_pinning() {
        assert!(check_footer(b"a", Some(b"a")).is_ok());
        assert!(check_footer(b"a", None).is_ok());
        assert!(matches!(
            check_footer(b"a", Some(b"b")),
            Err(PasetoError::FooterMismatch)
        ));
    }
}
