use std::{fmt, str, time};

use crate::{base32, validate, Error, Result};

/// Represents a Universally Unique Lexicographically Sortable Identifier.
///
/// The wrapped `u128` holds a 48-bit millisecond timestamp in its most significant bits and an
/// 80-bit random component in the rest. Equality, ordering, and hashing all follow that integer,
/// which orders the same way as the canonical 26-character string.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Ulid(u128);

impl Ulid {
    /// Number of bits in the timestamp field.
    pub const TIMESTAMP_BITS: u32 = 48;

    /// Number of bits in the random field.
    pub const RANDOM_BITS: u32 = 80;

    /// Largest timestamp representable in the 48-bit field.
    pub const MAX_TIMESTAMP: u64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Largest value representable in the 80-bit random field.
    pub const MAX_RANDOM: u128 = (1 << Self::RANDOM_BITS) - 1;

    /// Nil ULID (00000000000000000000000000)
    pub const NIL: Self = Self(0);

    /// Max ULID (7ZZZZZZZZZZZZZZZZZZZZZZZZZ)
    pub const MAX: Self = Self(u128::MAX);

    /// Packs a timestamp and a random component into a ULID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOutOfRange`] if `timestamp_ms` exceeds 48 bits, or
    /// [`Error::RandomOutOfRange`] if `random` exceeds 80 bits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid_engine::Ulid;
    ///
    /// let x = Ulid::from_parts(1_672_531_200_000, 12345)?;
    /// assert_eq!(x.to_string(), "01GNNA1J000000000000000C1S");
    /// assert_eq!(x.to_parts(), (1_672_531_200_000, 12345));
    /// # Ok::<(), ulid_engine::Error>(())
    /// ```
    pub const fn from_parts(timestamp_ms: u64, random: u128) -> Result<Self> {
        if timestamp_ms > Self::MAX_TIMESTAMP {
            Err(Error::TimestampOutOfRange(timestamp_ms))
        } else if random > Self::MAX_RANDOM {
            Err(Error::RandomOutOfRange(random))
        } else {
            Ok(Self(((timestamp_ms as u128) << Self::RANDOM_BITS) | random))
        }
    }

    /// Splits the ULID into its timestamp and random components.
    pub const fn to_parts(self) -> (u64, u128) {
        (self.timestamp_ms(), self.random())
    }

    /// Returns the timestamp field in milliseconds since the Unix epoch.
    pub const fn timestamp_ms(self) -> u64 {
        (self.0 >> Self::RANDOM_BITS) as u64
    }

    /// Returns the 80-bit random field.
    pub const fn random(self) -> u128 {
        self.0 & Self::MAX_RANDOM
    }

    /// Returns the underlying 128-bit value.
    pub const fn to_u128(self) -> u128 {
        self.0
    }

    /// Returns the 16-byte big-endian representation.
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Returns the timestamp field as a [`SystemTime`](time::SystemTime).
    pub fn to_system_time(self) -> time::SystemTime {
        time::UNIX_EPOCH + time::Duration::from_millis(self.timestamp_ms())
    }

    /// Returns the canonical 26-character representation stored in a stack-allocated string.
    ///
    /// Use the [`fmt::Display`] trait usually; this method avoids a heap allocation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid_engine::Ulid;
    ///
    /// let x = "01arz3ndektsv4rrffq69g5fav".parse::<Ulid>()?;
    /// assert_eq!(x.encode().as_str(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    /// # Ok::<(), ulid_engine::Error>(())
    /// ```
    pub fn encode(&self) -> fstr::FStr<{ base32::ULID_LEN }> {
        base32::encode_ulid(self.0)
    }
}

impl fmt::Display for Ulid {
    /// Returns the canonical uppercase Crockford Base32 representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Ulid {
    type Err = Error;

    /// Creates an object from a 26-character representation in any letter case.
    fn from_str(src: &str) -> Result<Self> {
        if !validate::is_well_formed(src) {
            return Err(Error::InvalidFormat);
        }
        base32::decode(src)
            .map(Self)
            .map_err(|_| Error::InvalidFormat)
    }
}

impl From<Ulid> for u128 {
    fn from(src: Ulid) -> Self {
        src.0
    }
}

impl From<u128> for Ulid {
    fn from(src: u128) -> Self {
        Self(src)
    }
}

impl From<Ulid> for [u8; 16] {
    fn from(src: Ulid) -> Self {
        src.to_bytes()
    }
}

impl From<[u8; 16]> for Ulid {
    fn from(src: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(src))
    }
}

impl From<Ulid> for String {
    fn from(src: Ulid) -> Self {
        src.to_string()
    }
}

impl TryFrom<&str> for Ulid {
    type Error = Error;

    fn try_from(src: &str) -> Result<Self> {
        src.parse()
    }
}

impl TryFrom<String> for Ulid {
    type Error = Error;

    fn try_from(src: String) -> Result<Self> {
        src.parse()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Ulid;

    impl From<Ulid> for uuid::Uuid {
        fn from(src: Ulid) -> Self {
            uuid::Uuid::from_u128(src.0)
        }
    }

    impl From<uuid::Uuid> for Ulid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.as_u128())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Ulid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Ulid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(&self.to_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Ulid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Ulid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a ULID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}
