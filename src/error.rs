use thiserror::Error;

/// Errors reported by the codec, the bit packer, and the generators.
///
/// Every variant is detected synchronously at the point of bad input; nothing is retried or
/// swallowed internally. The type is `Copy` so callers (and tests) can match on the kind.
#[derive(Error, Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Error {
    /// A ULID string has the wrong length, a character outside the alphabet, or a value above
    /// 128 bits.
    #[error("invalid ULID string representation")]
    InvalidFormat,

    /// Base32 input contains a symbol outside the Crockford alphabet.
    #[error("invalid character {character:?} at position {position} in Base32 string")]
    InvalidCharacter { character: char, position: usize },

    /// A value does not fit in `width` Base32 digits.
    #[error("value does not fit in {width} Base32 digits")]
    ValueOverflow { width: usize },

    /// Timestamp exceeds the 48-bit field.
    #[error("timestamp {0} exceeds the 48-bit field")]
    TimestampOutOfRange(u64),

    /// Random component exceeds the 80-bit field.
    #[error("random component {0:#x} exceeds the 80-bit field")]
    RandomOutOfRange(u128),

    /// Caller-supplied timestamp is negative or exceeds the 48-bit field.
    #[error("timestamp {0} is negative or exceeds the 48-bit field")]
    InvalidTimestamp(i64),

    /// A UUID string is not 32 hex digits, optionally hyphenated 8-4-4-4-12.
    #[error("invalid UUID string representation")]
    InvalidUuid,

    /// The 80-bit random field was exhausted within a single millisecond.
    #[error("random component overflow: too many ULIDs in the same millisecond")]
    MonotonicOverflow,
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
