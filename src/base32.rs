//! Crockford Base32 codec
//!
//! Values are rendered most-significant digit first and zero-padded on the left, so the
//! lexicographic order of equal-width encodings matches the numeric order of the values they
//! represent. Decoding is case-insensitive; encoding always emits uppercase.

use crate::{Error, Result};
use fstr::FStr;

/// The 32-symbol Crockford alphabet, in digit order (`I`, `L`, `O`, and `U` are excluded).
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Number of Base32 digits in the canonical ULID string representation.
pub const ULID_LEN: usize = 26;

/// Reverse lookup from an ASCII byte to its digit value, or `0xff` outside the alphabet.
const DECODE_MAP: [u8; 128] = {
    let mut map = [0xff; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        map[ALPHABET[i] as usize] = i as u8;
        map[ALPHABET[i].to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }
    map
};

/// Returns the digit value of an ASCII byte, folding case.
pub(crate) fn digit_of(byte: u8) -> Option<u8> {
    match DECODE_MAP.get(byte as usize) {
        Some(&d) if d < 32 => Some(d),
        _ => None,
    }
}

fn fill_digits(buffer: &mut [u8], mut value: u128) {
    for e in buffer.iter_mut().rev() {
        *e = ALPHABET[(value & 31) as usize];
        value >>= 5;
    }
}

/// Encodes `value` as exactly `width` uppercase Base32 digits.
///
/// # Errors
///
/// Returns [`Error::ValueOverflow`] if `value` needs more than `width * 5` bits.
///
/// # Examples
///
/// ```rust
/// use ulid_engine::base32;
///
/// assert_eq!(base32::encode(1000, 4)?, "00Z8");
/// assert!(base32::encode(1000, 1).is_err());
/// # Ok::<(), ulid_engine::Error>(())
/// ```
pub fn encode(value: u128, width: usize) -> Result<String> {
    let capacity = width.saturating_mul(5);
    if capacity < 128 && value >> capacity != 0 {
        return Err(Error::ValueOverflow { width });
    }
    let mut buffer = vec![b'0'; width];
    fill_digits(&mut buffer, value);
    Ok(buffer.into_iter().map(char::from).collect())
}

/// Encodes `value` as the 26-digit canonical form in a stack-allocated string.
///
/// Twenty-six digits hold 130 bits, so every `u128` fits and this never fails.
pub fn encode_ulid(value: u128) -> FStr<ULID_LEN> {
    let mut buffer = [b'0'; ULID_LEN];
    fill_digits(&mut buffer, value);
    debug_assert!(buffer.is_ascii());
    unsafe { FStr::from_inner_unchecked(buffer) }
}

/// Decodes a Base32 digit string of any length and any letter case.
///
/// An empty string decodes to zero. Length is not checked here; see
/// [`is_well_formed`](crate::validate::is_well_formed) for the ULID length constraint.
///
/// # Errors
///
/// Returns [`Error::InvalidCharacter`] for the first symbol outside the alphabet, or
/// [`Error::ValueOverflow`] if the digits represent a value above `u128::MAX`.
pub fn decode(s: &str) -> Result<u128> {
    let mut value = 0u128;
    let mut overflow = false;
    let mut width = 0;
    for (position, character) in s.chars().enumerate() {
        let digit = u8::try_from(character)
            .ok()
            .and_then(digit_of)
            .ok_or(Error::InvalidCharacter {
                character,
                position,
            })?;
        overflow |= value >> 123 != 0;
        value = (value << 5) | digit as u128;
        width = position + 1;
    }
    if overflow {
        Err(Error::ValueOverflow { width })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, encode_ulid, Error, ALPHABET};

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [(u128, &'static str)] {
        &[
            (0, "00000000000000000000000000"),
            (31, "0000000000000000000000000Z"),
            (32, "00000000000000000000000010"),
            (1000, "000000000000000000000000Z8"),
            ((1 << 32) - 1, "00000000000000000003ZZZZZZ"),
            (u64::MAX as u128, "0000000000000FZZZZZZZZZZZZ"),
            ((1 << 80) - 1, "0000000000ZZZZZZZZZZZZZZZZ"),
            (
                2021966151791039271126330192691212345,
                "01GNNA1J000000000000000C1S",
            ),
            (u128::MAX, "7ZZZZZZZZZZZZZZZZZZZZZZZZZ"),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for &(value, text) in prepare_cases() {
            assert_eq!(&encode_ulid(value) as &str, text);
            assert_eq!(encode(value, 26).as_deref(), Ok(text));
            assert_eq!(decode(text), Ok(value));
            assert_eq!(decode(&text.to_lowercase()), Ok(value));
        }
    }

    /// Keeps alphabet in ascending byte order
    #[test]
    fn keeps_alphabet_in_ascending_byte_order() {
        assert!(ALPHABET.windows(2).all(|w| w[0] < w[1]));
        for c in b"ILOU" {
            assert!(!ALPHABET.contains(c));
        }
    }

    /// Pads to arbitrary width and rejects too narrow width
    #[test]
    fn pads_to_arbitrary_width_and_rejects_too_narrow_width() {
        assert_eq!(encode(31, 1).as_deref(), Ok("Z"));
        assert_eq!(encode(0, 0).as_deref(), Ok(""));
        assert_eq!(encode(32, 1), Err(Error::ValueOverflow { width: 1 }));
        assert_eq!(encode(1, 0), Err(Error::ValueOverflow { width: 0 }));
        assert_eq!(encode(1 << 48, 10).map(|s| s.len()), Ok(10));
        assert_eq!(encode(1 << 50, 10), Err(Error::ValueOverflow { width: 10 }));
        assert_eq!(
            encode(u128::MAX, 30).as_deref(),
            Ok("00007ZZZZZZZZZZZZZZZZZZZZZZZZZ")
        );
    }

    /// Decodes empty string to zero
    #[test]
    fn decodes_empty_string_to_zero() {
        assert_eq!(decode(""), Ok(0));
    }

    /// Reports first character outside alphabet
    #[test]
    fn reports_first_character_outside_alphabet() {
        for (text, character, position) in [
            ("I", 'I', 0),
            ("L", 'L', 0),
            ("O", 'O', 0),
            ("U", 'U', 0),
            ("u", 'u', 0),
            ("01ARZ3NDEKTSV4RRFFQ69G5FAI", 'I', 25),
            ("01ARZ3NDEKTSV4RRFFQ69G5FA@", '@', 25),
            ("01-2", '-', 2),
            ("0é", 'é', 1),
        ] {
            assert_eq!(
                decode(text),
                Err(Error::InvalidCharacter {
                    character,
                    position
                })
            );
        }
    }

    /// Rejects values above 128 bits
    #[test]
    fn rejects_values_above_128_bits() {
        assert_eq!(
            decode("80000000000000000000000000"),
            Err(Error::ValueOverflow { width: 26 })
        );
        assert_eq!(
            decode("000000000000000000000000000"),
            Ok(0),
            "leading zeros beyond 26 digits are harmless"
        );
        assert_eq!(
            decode("0ZZZZZZZZZZZZZZZZZZZZZZZZZZ"),
            Err(Error::ValueOverflow { width: 27 })
        );
    }

    /// Decodes case-insensitively
    #[test]
    fn decodes_case_insensitively() {
        let text = "01ARZ3NDEKTSV4RRFFQ69G5FAV";
        assert_eq!(decode(text), decode(&text.to_lowercase()));
        assert_eq!(decode(text), decode("01arZ3ndEKtsv4rrffq69g5fAV"));
    }

    /// Decodes what it encodes
    #[test]
    fn decodes_what_it_encodes() {
        use rand::RngCore;
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let value = ((rng.next_u64() as u128) << 64) | rng.next_u64() as u128;
            assert_eq!(decode(&encode_ulid(value)), Ok(value));
        }
    }
}
