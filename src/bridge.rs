//! UUID textual form of the same 128 bits

use std::{fmt, str};

use fstr::FStr;

use crate::{Error, Result, Ulid};

/// A 128-bit value in UUID clothing.
///
/// Conversions to and from [`Ulid`] reinterpret the same bits; no version or variant field is
/// read or written.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the lowercase 8-4-4-4-12 hexadecimal representation in a stack-allocated string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid_engine::{Ulid, Uuid};
    ///
    /// let x = Uuid::from("01ARZ3NDEKTSV4RRFFQ69G5FAV".parse::<Ulid>()?);
    /// assert_eq!(x.encode().as_str(), "01563e3a-b5d3-d676-4c61-efb99302bd5b");
    /// # Ok::<(), ulid_engine::Error>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut pos = 0;
        for (i, e) in self.0.iter().enumerate() {
            buffer[pos] = DIGITS[(e >> 4) as usize];
            buffer[pos + 1] = DIGITS[(e & 15) as usize];
            pos += 2;
            if matches!(i, 3 | 5 | 7 | 9) {
                buffer[pos] = b'-';
                pos += 1;
            }
        }
        debug_assert!(buffer.is_ascii());
        unsafe { FStr::from_inner_unchecked(buffer) }
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 hexadecimal representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = Error;

    /// Creates an object from 32 hexadecimal digits in any letter case, either bare or hyphenated
    /// as 8-4-4-4-12.
    fn from_str(src: &str) -> Result<Self> {
        const ERR: Error = Error::InvalidUuid;
        let hyphenated = match src.len() {
            36 => true,
            32 => false,
            _ => return Err(ERR),
        };

        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if hyphenated && matches!(i, 3 | 5 | 7 | 9) && iter.next() != Some('-') {
                return Err(ERR);
            }
        }
        match iter.next() {
            None => Ok(Self(dst)),
            Some(_) => Err(ERR),
        }
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Ulid> for Uuid {
    fn from(src: Ulid) -> Self {
        Self(src.to_bytes())
    }
}

impl From<Uuid> for Ulid {
    fn from(src: Uuid) -> Self {
        Self::from(src.0)
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}
