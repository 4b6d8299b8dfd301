//! Reference-code generation for inventory documents.

use rand::Rng;

/// Characters a reference code draws from.
pub const REF_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated reference code.
pub const REF_LENGTH: usize = 8;

/// Generate a document reference code: 8 characters drawn uniformly from
/// `[A-Z0-9]`. Best-effort unique (36^8 combinations); callers do not
/// re-check for collisions.
pub fn generate_ref() -> String {
    let mut rng = rand::thread_rng();
    (0..REF_LENGTH)
        .map(|_| REF_CHARSET[rng.gen_range(0..REF_CHARSET.len())] as char)
        .collect()
}

/// Whether a string is a well-formed reference code.
pub fn is_valid_ref(code: &str) -> bool {
    code.len() == REF_LENGTH && code.bytes().all(|b| REF_CHARSET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generated_refs_are_well_formed() {
        for _ in 0..100 {
            let code = generate_ref();
            assert!(is_valid_ref(&code), "bad reference code: {code}");
        }
    }

    #[test]
    fn test_generated_refs_vary() {
        let first = generate_ref();
        let distinct = (0..20).any(|_| generate_ref() != first);
        assert!(distinct, "20 consecutive identical reference codes");
    }

    #[test]
    fn test_is_valid_ref_rejects_bad_input() {
        assert!(!is_valid_ref(""));
        assert!(!is_valid_ref("ABC123"));
        assert!(!is_valid_ref("ABCD12345"));
        assert!(!is_valid_ref("abcd1234"));
        assert!(!is_valid_ref("ABCD-123"));
    }

    proptest! {
        #[test]
        fn prop_valid_refs_roundtrip(code in "[A-Z0-9]{8}") {
            prop_assert!(is_valid_ref(&code));
        }

        #[test]
        fn prop_wrong_length_rejected(code in "[A-Z0-9]{0,7}") {
            prop_assert!(!is_valid_ref(&code));
        }
    }
}
