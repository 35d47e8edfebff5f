//! ULID generation, Crockford Base32 codec, and UUID interoperability
//!
//! ```rust
//! use ulid_engine::{ulid_monotonic, ulid_timestamp};
//!
//! let text = ulid_monotonic()?;
//! println!("{text}"); // e.g. "01HF7YAT00T8ZJZKB5S7YMKCH8"
//! println!("{}", ulid_timestamp(&text)?); // milliseconds since the Unix epoch
//! # Ok::<(), ulid_engine::Error>(())
//! ```
//!
//! # Field and bit layout
//!
//! A ULID is a 128-bit unsigned integer:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |            random             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            random                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            random                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The canonical text form is 26 Crockford Base32 digits (`0-9` and `A-Z` without `I`, `L`,
//! `O`, and `U`), uppercase, zero-padded: 10 digits for the timestamp and 16 for the random
//! field. Because the encoding is fixed-width and the alphabet is in ascending byte order, the
//! strings sort exactly like the integers. Input is accepted in any letter case.
//!
//! # Monotonic generation
//!
//! [`MonotonicGenerator`] and [`Engine::generate_monotonic`] keep the last issued pair of
//! timestamp and random component. Within one millisecond, and whenever the clock reads earlier
//! than the stored timestamp, the next ULID reuses the stored timestamp and increments the
//! random component by one. In the astronomically rare case that the 80-bit random field is
//! exhausted, the default [`OverflowPolicy`] moves the timestamp one millisecond ahead; the
//! alternative policy fails with [`Error::MonotonicOverflow`].
//!
//! # Crate features
//!
//! - `global_gen` (default): the process-wide [`default_engine`] behind [`ulid`] and
//!   [`ulid_monotonic`].
//! - `serde`: string (human-readable) or 16-byte (compact) serialization of [`Ulid`].
//! - `uuid`: conversions between [`Ulid`] and `uuid::Uuid`.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::{Error, Result};

pub mod base32;
pub mod validate;

mod id;
pub use id::Ulid;

mod bridge;
pub use bridge::Uuid;

pub mod rand_source;
pub use rand_source::{next_random, RandSource};

pub mod generator;
pub use generator::{Clock, MonotonicGenerator, OverflowPolicy, SystemClock};

mod engine;
pub use engine::{
    decode_base32, encode_base32, ulid_from_str, ulid_is_valid, ulid_random, ulid_timestamp,
    ulid_to_uuid, ulid_with_timestamp, uuid_to_ulid, Engine,
};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{default_engine, ulid, ulid_monotonic, GlobalEngineRng};
