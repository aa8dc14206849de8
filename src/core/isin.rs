// uniwatch - core/isin.rs
//
// Identifier validator: the pure predicate that decides whether a token
// is a well-formed instrument identifier. This is what separates
// instrument rows from page furniture in the extractor, so the rule is
// deliberately strict and ASCII-only (no locale-sensitive casing).

use crate::util::constants::{ISIN_LENGTH, ISIN_PREFIX_LENGTH};

/// Returns true when `token` has the fixed ISIN shape: exactly 12
/// characters, the first 2 ASCII-alphabetic, the remaining 10
/// ASCII-alphanumeric.
///
/// Case-insensitive by construction -- both `de000basf111` and
/// `DE000BASF111` pass. Validation never normalises; the snapshot layer
/// handles uppercasing.
pub fn is_valid_isin(token: &str) -> bool {
    // Byte length equals char length for ASCII; any multi-byte character
    // fails the per-byte class checks below regardless.
    if token.len() != ISIN_LENGTH {
        return false;
    }

    let bytes = token.as_bytes();
    bytes[..ISIN_PREFIX_LENGTH]
        .iter()
        .all(|b| b.is_ascii_alphabetic())
        && bytes[ISIN_PREFIX_LENGTH..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_well_formed_isins() {
        assert!(is_valid_isin("DE000BASF111"));
        assert!(is_valid_isin("US0378331005"));
        assert!(is_valid_isin("IE00B4L5Y983"));
        // Lowercase is valid at this stage; normalisation happens later.
        assert!(is_valid_isin("de000basf111"));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(!is_valid_isin("DE000BASF11")); // 11 chars
        assert!(!is_valid_isin("DE000BASF1111")); // 13 chars
        assert!(!is_valid_isin(""));
    }

    #[test]
    fn test_rejects_non_alphabetic_prefix() {
        assert!(!is_valid_isin("12000BASF111"));
        assert!(!is_valid_isin("D1000BASF111"));
        assert!(!is_valid_isin("1E000BASF111"));
    }

    #[test]
    fn test_rejects_non_alphanumeric_body() {
        assert!(!is_valid_isin("DE000BASF-11"));
        assert!(!is_valid_isin("DE000BASF 11"));
        assert!(!is_valid_isin("DE000BASF.11"));
    }

    #[test]
    fn test_rejects_non_ascii() {
        // 12 chars but multi-byte: 'Ä' is neither ASCII-alphabetic here
        // nor 1 byte, so both the length and class checks reject it.
        assert!(!is_valid_isin("ÄE000BASF111"));
        assert!(!is_valid_isin("DE000BASF11Ö"));
    }
}
