//! Monotonic ULID generator and related types.

use std::time;

use crate::rand_source::{next_random, RandSource};
use crate::{Error, Result, Ulid};

/// What [`MonotonicGenerator`] does when the random field cannot be incremented any further
/// within the same millisecond.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum OverflowPolicy {
    /// Moves the timestamp one millisecond ahead of the last one and draws a fresh random
    /// component, so the timestamp may run slightly ahead of the real-time clock.
    #[default]
    AdvanceTimestamp,

    /// Returns [`Error::MonotonicOverflow`] and leaves the generator state untouched.
    Fail,
}

/// A source of the current Unix time in milliseconds.
pub trait Clock {
    /// Returns the number of milliseconds elapsed since the Unix epoch.
    fn now_ms(&self) -> u64;
}

/// [`Clock`] backed by [`SystemTime`](time::SystemTime). Reads before the epoch return zero.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}

impl<F: Fn() -> u64> Clock for F {
    fn now_ms(&self) -> u64 {
        self()
    }
}

/// Represents a ULID generator that keeps the last issued `(timestamp, random)` pair and
/// guarantees strictly increasing output, even within the same millisecond.
///
/// The generator is a plain value driven through `&mut self`; wrap it in a lock (or use
/// [`Engine`](crate::Engine), which does so) to share one sequence between threads.
///
/// # Transition rule
///
/// | Timestamp passed           | Next ULID                                           |
/// | -------------------------- | --------------------------------------------------- |
/// | Greater than the last one  | Passed timestamp with a fresh random component      |
/// | Equal to or less than it   | Last timestamp with the random component plus one   |
///
/// A clock that moves backward therefore never makes the output regress. When the random
/// component is already at its maximum, the [`OverflowPolicy`] decides.
///
/// # Examples
///
/// ```rust
/// use ulid_engine::MonotonicGenerator;
///
/// let mut g = MonotonicGenerator::new(rand::thread_rng());
/// let first = g.generate_core(1_672_531_200_000)?;
/// let second = g.generate_core(1_672_531_200_000)?;
/// assert_eq!(second.random(), first.random() + 1);
/// # Ok::<(), ulid_engine::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct MonotonicGenerator<R> {
    last: Option<Ulid>,
    policy: OverflowPolicy,

    /// The random number generator used by the generator.
    rng: R,
}

impl<R: RandSource> MonotonicGenerator<R> {
    /// Creates a generator instance.
    pub const fn new(rng: R) -> Self {
        Self {
            last: None,
            policy: OverflowPolicy::AdvanceTimestamp,
            rng,
        }
    }

    /// Replaces the policy applied when the random component overflows.
    pub fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the configured overflow policy.
    pub const fn overflow_policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Returns the most recently generated ULID, if any.
    pub const fn last_issued(&self) -> Option<Ulid> {
        self.last
    }

    /// Generates a new ULID from the current system time.
    pub fn generate(&mut self) -> Result<Ulid> {
        self.generate_core(SystemClock.now_ms())
    }

    /// Generates a new ULID from the `unix_ts_ms` passed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOutOfRange`] if `unix_ts_ms` exceeds 48 bits, or
    /// [`Error::MonotonicOverflow`] if the random component is exhausted and the policy (or the
    /// timestamp field) does not permit advancing. The state is unchanged on error.
    pub fn generate_core(&mut self, unix_ts_ms: u64) -> Result<Ulid> {
        if unix_ts_ms > Ulid::MAX_TIMESTAMP {
            return Err(Error::TimestampOutOfRange(unix_ts_ms));
        }

        let next = match self.last {
            Some(last) if unix_ts_ms <= last.timestamp_ms() => {
                if unix_ts_ms < last.timestamp_ms() {
                    tracing::debug!(
                        last_timestamp_ms = last.timestamp_ms(),
                        unix_ts_ms,
                        "clock moved backward; continuing from last timestamp"
                    );
                }
                self.increment(last)?
            }
            _ => Ulid::from_parts(unix_ts_ms, next_random(&mut self.rng))?,
        };

        self.last = Some(next);
        Ok(next)
    }

    fn increment(&mut self, last: Ulid) -> Result<Ulid> {
        let (timestamp, random) = last.to_parts();
        if random < Ulid::MAX_RANDOM {
            return Ulid::from_parts(timestamp, random + 1);
        }

        match self.policy {
            OverflowPolicy::AdvanceTimestamp if timestamp < Ulid::MAX_TIMESTAMP => {
                tracing::warn!(
                    timestamp_ms = timestamp,
                    "random component exhausted; advancing timestamp by one millisecond"
                );
                Ulid::from_parts(timestamp + 1, next_random(&mut self.rng))
            }
            _ => {
                tracing::warn!(timestamp_ms = timestamp, "random component exhausted");
                Err(Error::MonotonicOverflow)
            }
        }
    }
}

/// Supports operations as an infinite iterator that produces a new ULID for each call of
/// `next()`, ending only if generation fails.
///
/// # Examples
///
/// ```rust
/// use ulid_engine::MonotonicGenerator;
///
/// MonotonicGenerator::new(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// ```
impl<R: RandSource> Iterator for MonotonicGenerator<R> {
    type Item = Ulid;

    fn next(&mut self) -> Option<Self::Item> {
        self.generate().ok()
    }
}
