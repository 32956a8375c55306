//! Property-based tests for the token engine.
//!
//! These verify the security properties that must always hold:
//! - Signing and encryption are reversible with the right key material
//! - Footers and implicit assertions are bound into the authentication

mod common;

use common::{test_keypair, test_symmetric_key};
use keymint_paseto::{local, public};
use proptest::prelude::*;

fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..2000)
}

fn footer_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

mod signing_properties {
    use super::*;

    proptest! {
        /// verify(sign(m)) returns m for any payload and footer.
        #[test]
        fn roundtrip_preserves_payload(
            payload in payload_strategy(),
            footer in footer_strategy(),
        ) {
            let pair = test_keypair();
            let token = public::sign(pair.signing(), &payload, &footer, b"").unwrap();
            let (message, token_footer) =
                public::verify(&token, pair.verifying(), None, b"").unwrap();

            prop_assert_eq!(message, payload);
            prop_assert_eq!(token_footer, footer);
        }

        /// Pinning the exact footer at verification succeeds.
        #[test]
        fn pinned_footer_accepts_match(
            payload in payload_strategy(),
            footer in footer_strategy(),
        ) {
            let pair = test_keypair();
            let token = public::sign(pair.signing(), &payload, &footer, b"").unwrap();
            prop_assert!(
                public::verify(&token, pair.verifying(), Some(&footer), b"").is_ok()
            );
        }
    }
}

mod encryption_properties {
    use super::*;

    proptest! {
        /// decrypt(encrypt(m, f)) returns (m, f) for any payload and footer.
        #[test]
        fn roundtrip_preserves_payload(
            payload in payload_strategy(),
            footer in footer_strategy(),
        ) {
            let key = test_symmetric_key();
            let token = local::encrypt(&key, &payload, &footer, b"").unwrap();
            let (message, token_footer) = local::decrypt(&token, &key, None, b"").unwrap();

            prop_assert_eq!(message, payload);
            prop_assert_eq!(token_footer, footer);
        }

        /// Any flipped byte inside the body invalidates the token.
        #[test]
        fn bit_flips_are_rejected(
            payload in payload_strategy(),
            flip_pos in any::<usize>(),
        ) {
            let key = test_symmetric_key();
            let token = local::encrypt(&key, &payload, b"", b"").unwrap();

            let body_start = "v4.local.".len();
            let body = token[body_start..].as_bytes();
            let pos = body_start + flip_pos % body.len();

            let mut bytes = token.clone().into_bytes();
            bytes[pos] = if bytes[pos] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            if tampered != token {
                prop_assert!(local::decrypt(&tampered, &key, None, b"").is_err());
            }
        }
    }
}
