//! Identifier engine and the string-level operation surface

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::generator::{Clock, MonotonicGenerator, OverflowPolicy, SystemClock};
use crate::rand_source::{next_random, RandSource};
use crate::{base32, Error, Result, Ulid, Uuid};

/// Orchestrates plain, monotonic, and timestamp-pinned generation over one shared monotonic
/// state.
///
/// An `Engine` is `Sync` whenever its random number generator is `Send` and its clock is `Sync`,
/// so one instance can be shared (by reference, `Arc`, or a `static`) by every caller that must
/// observe a single increasing sequence. Only [`generate_monotonic`](Self::generate_monotonic)
/// takes the lock; the other generators draw from a thread-local random number generator.
///
/// # Examples
///
/// ```rust
/// use std::{sync::Arc, thread};
/// use ulid_engine::Engine;
///
/// let engine = Arc::new(Engine::new(rand::rngs::OsRng));
/// let handle = {
///     let engine = Arc::clone(&engine);
///     thread::spawn(move || engine.generate_monotonic())
/// };
///
/// let mine = engine.generate_monotonic()?;
/// let theirs = handle.join().unwrap()?;
/// assert_ne!(mine, theirs);
/// # Ok::<(), ulid_engine::Error>(())
/// ```
#[derive(Debug)]
pub struct Engine<R, C = SystemClock> {
    monotonic: Mutex<MonotonicGenerator<R>>,
    clock: C,
}

impl<R: RandSource> Engine<R> {
    /// Creates an engine reading the system clock.
    pub fn new(rng: R) -> Self {
        Self::with_clock(rng, SystemClock)
    }
}

impl<R: RandSource, C: Clock> Engine<R, C> {
    /// Creates an engine reading the given clock.
    pub fn with_clock(rng: R, clock: C) -> Self {
        Self {
            monotonic: Mutex::new(MonotonicGenerator::new(rng)),
            clock,
        }
    }

    /// Replaces the policy applied when the monotonic random component overflows.
    pub fn with_overflow_policy(self, policy: OverflowPolicy) -> Self {
        let monotonic = self
            .monotonic
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .with_overflow_policy(policy);
        Self {
            monotonic: Mutex::new(monotonic),
            clock: self.clock,
        }
    }

    /// Locks the monotonic state, ignoring poisoning: transitions commit in a single assignment.
    fn lock(&self) -> MutexGuard<'_, MonotonicGenerator<R>> {
        self.monotonic
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Discards the monotonic state and starts a fresh sequence with `rng`.
    pub fn reset(&self, rng: R) {
        let mut guard = self.lock();
        let policy = guard.overflow_policy();
        *guard = MonotonicGenerator::new(rng).with_overflow_policy(policy);
    }

    /// Generates a ULID from the current time and a fresh random component.
    ///
    /// Results within the same millisecond are unordered with respect to each other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOutOfRange`] if the clock reads beyond the 48-bit field.
    pub fn generate(&self) -> Result<Ulid> {
        Ulid::from_parts(self.clock.now_ms(), next_random(&mut rand::thread_rng()))
    }

    /// Generates a ULID strictly greater than every ULID previously returned by this method on
    /// this engine, from any thread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOutOfRange`] if the clock reads beyond the 48-bit field, or
    /// [`Error::MonotonicOverflow`] as described in [`OverflowPolicy`].
    pub fn generate_monotonic(&self) -> Result<Ulid> {
        let mut guard = self.lock();
        guard.generate_core(self.clock.now_ms())
    }

    /// Generates a ULID for the given timestamp with a fresh random component.
    ///
    /// This bypasses the monotonic state: repeated calls with one timestamp are unordered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimestamp`] if `timestamp_ms` is negative or exceeds 48 bits.
    pub fn generate_with_timestamp(&self, timestamp_ms: i64) -> Result<Ulid> {
        ulid_from_timestamp(timestamp_ms)
    }
}

fn ulid_from_timestamp(timestamp_ms: i64) -> Result<Ulid> {
    let timestamp = u64::try_from(timestamp_ms)
        .ok()
        .filter(|&ts| ts <= Ulid::MAX_TIMESTAMP)
        .ok_or(Error::InvalidTimestamp(timestamp_ms))?;
    Ulid::from_parts(timestamp, next_random(&mut rand::thread_rng()))
}

/// Generates a canonical ULID string for the given timestamp with a fresh random component.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] if `timestamp_ms` is negative or exceeds 48 bits.
///
/// # Examples
///
/// ```rust
/// use ulid_engine::{ulid_timestamp, ulid_with_timestamp};
///
/// let text = ulid_with_timestamp(1_672_531_200_000)?;
/// assert_eq!(ulid_timestamp(&text)?, 1_672_531_200_000);
/// # Ok::<(), ulid_engine::Error>(())
/// ```
pub fn ulid_with_timestamp(timestamp_ms: i64) -> Result<String> {
    ulid_from_timestamp(timestamp_ms).map(String::from)
}

/// Returns `true` if `s` is a ULID string in any letter case.
pub fn ulid_is_valid(s: &str) -> bool {
    s.parse::<Ulid>().is_ok()
}

/// Returns the timestamp field of a ULID string.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if `s` is not a valid ULID string.
pub fn ulid_timestamp(s: &str) -> Result<u64> {
    s.parse::<Ulid>().map(Ulid::timestamp_ms)
}

/// Returns the random field of a ULID string.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if `s` is not a valid ULID string.
pub fn ulid_random(s: &str) -> Result<u128> {
    s.parse::<Ulid>().map(Ulid::random)
}

/// Returns the canonical uppercase form of a ULID string in any letter case.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if `s` is not a valid ULID string.
pub fn ulid_from_str(s: &str) -> Result<String> {
    s.parse::<Ulid>().map(String::from)
}

/// Renders the 128 bits of a ULID string as a lowercase hyphenated UUID string.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if `s` is not a valid ULID string.
pub fn ulid_to_uuid(s: &str) -> Result<String> {
    s.parse::<Ulid>().map(|e| Uuid::from(e).to_string())
}

/// Renders the 128 bits of a UUID string, hyphenated or bare, as a canonical ULID string.
///
/// # Errors
///
/// Returns [`Error::InvalidUuid`] if `s` is not a valid UUID string.
pub fn uuid_to_ulid(s: &str) -> Result<String> {
    s.parse::<Uuid>().map(|e| Ulid::from(e).to_string())
}

/// Encodes a 128-bit value as 26 Crockford Base32 digits.
///
/// # Errors
///
/// Never fails for a `u128`; the error type mirrors [`base32::encode`].
pub fn encode_base32(value: u128) -> Result<String> {
    base32::encode(value, base32::ULID_LEN)
}

/// Decodes Crockford Base32 digits in any letter case; see [`base32::decode`].
///
/// # Errors
///
/// Returns [`Error::InvalidCharacter`] or [`Error::ValueOverflow`].
pub fn decode_base32(s: &str) -> Result<u128> {
    base32::decode(s)
}
