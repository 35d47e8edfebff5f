//! Textual well-formedness checks

use crate::base32::{digit_of, ULID_LEN};

/// Returns `true` if `s` is exactly 26 characters long and every character, case-folded, is in
/// the Crockford alphabet.
///
/// A well-formed string may still be rejected by [`decode`](crate::base32::decode) when its
/// leading digit pushes the value above 128 bits; use [`Ulid::from_str`](crate::Ulid) or
/// [`ulid_is_valid`](crate::ulid_is_valid) for the full check.
pub fn is_well_formed(s: &str) -> bool {
    s.len() == ULID_LEN && s.bytes().all(|b| digit_of(b).is_some())
}

#[cfg(test)]
mod tests {
    use super::is_well_formed;

    /// Accepts any letter case
    #[test]
    fn accepts_any_letter_case() {
        assert!(is_well_formed("01ARZ3NDEKTSV4RRFFQ69G5FAV"));
        assert!(is_well_formed("01arz3ndektsv4rrffq69g5fav"));
        assert!(is_well_formed("ZZZZZZZZZZZZZZZZZZZZZZZZZZ"));
    }

    /// Rejects wrong length and excluded characters
    #[test]
    fn rejects_wrong_length_and_excluded_characters() {
        let cases = [
            "",
            "01ARZ3NDEKTSV4RRFFQ69G5FA",
            "01ARZ3NDEKTSV4RRFFQ69G5FAVX",
            "INVALID_ULID_STRING_HERE",
            "01ARZ3NDEKTSV4RRFFQ69G5FAI",
            "01ARZ3NDEKTSV4RRFFQ69G5FAl",
            "01ARZ3NDEKTSV4RRFFQ69G5FAO",
            "01ARZ3NDEKTSV4RRFFQ69G5FAu",
            "01ARZ3NDEKTSV4RRFFQ69G5FA-",
            " 1ARZ3NDEKTSV4RRFFQ69G5FAV",
            "01ARZ3NDEKTSV4RRFFQ69G5Fé",
        ];
        for e in cases {
            assert!(!is_well_formed(e), "{e:?}");
        }
    }
}
