//! Default engine and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync::OnceLock;

use crate::{Engine, Result};
use inner::GlobalEngine;
pub use inner::GlobalEngineRng;

/// Returns the process-wide default engine, creating one if none exists.
///
/// Code that needs a separate sequence, a custom clock, or a custom random number generator
/// should construct its own [`Engine`] instead.
pub fn default_engine() -> &'static Engine<GlobalEngineRng> {
    static G: OnceLock<GlobalEngine> = OnceLock::new();
    G.get_or_init(GlobalEngine::new).get()
}

/// Generates a ULID string from the current time and a fresh random component.
///
/// # Examples
///
/// ```rust
/// let text = ulid_engine::ulid()?;
/// assert_eq!(text.len(), 26);
/// # Ok::<(), ulid_engine::Error>(())
/// ```
pub fn ulid() -> Result<String> {
    default_engine().generate().map(String::from)
}

/// Generates a ULID string that is strictly greater than every string previously returned by
/// this function in the current process.
///
/// # Examples
///
/// ```rust
/// let a = ulid_engine::ulid_monotonic()?;
/// let b = ulid_engine::ulid_monotonic()?;
/// assert!(a < b);
/// # Ok::<(), ulid_engine::Error>(())
/// ```
pub fn ulid_monotonic() -> Result<String> {
    default_engine().generate_monotonic().map(String::from)
}

mod inner {
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    use crate::Engine;

    /// The random number generator of the default engine.
    pub type GlobalEngineRng = ChaCha12Rng;

    /// A thin wrapper to reset the monotonic state when the process ID changes (i.e., upon Unix
    /// forks), so that parent and child do not continue the same sequence.
    #[derive(Debug)]
    pub struct GlobalEngine {
        #[cfg(unix)]
        pid: std::sync::atomic::AtomicU32,
        engine: Engine<GlobalEngineRng>,
    }

    impl GlobalEngine {
        pub fn new() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::sync::atomic::AtomicU32::new(std::process::id()),
                engine: Engine::new(ChaCha12Rng::from_entropy()),
            }
        }

        /// Returns the inner [`Engine`], reseeding it on Unix if the process ID has changed.
        pub fn get(&self) -> &Engine<GlobalEngineRng> {
            #[cfg(unix)]
            {
                use std::sync::atomic::Ordering;
                let pid = std::process::id();
                if self.pid.swap(pid, Ordering::AcqRel) != pid {
                    tracing::debug!(pid, "process ID changed; resetting default ULID engine");
                    self.engine.reset(ChaCha12Rng::from_entropy());
                }
            }
            &self.engine
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ulid, ulid_monotonic};
    use crate::{generator::Clock, SystemClock, Ulid};

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES)
        .map(|_| ulid_monotonic().unwrap())
        .collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let re = regex::Regex::new(r"^[0-7][0-9A-HJKMNP-TV-Z]{25}$").unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
        for _ in 0..1_000 {
            assert!(re.is_match(&ulid().unwrap()));
        }
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Generates sortable string representation by creation time
    #[test]
    fn generates_sortable_string_representation_by_creation_time() {
        SAMPLES.with(|samples| {
            for i in 1..N_SAMPLES {
                assert!(samples[i - 1] < samples[i]);
            }
        });
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        for _ in 0..10_000 {
            let ts_now = SystemClock.now_ms() as i64;
            let e: Ulid = ulid().unwrap().parse().unwrap();
            assert!((ts_now - e.timestamp_ms() as i64).abs() < 16);
        }
    }

    /// Encodes unique sortable pair of timestamp and random component
    #[test]
    fn encodes_unique_sortable_pair_of_timestamp_and_random_component() {
        SAMPLES.with(|samples| {
            let mut prev_timestamp = &samples[0][0..10];
            let mut prev_random = &samples[0][10..];
            for e in &samples[1..] {
                let curr_timestamp = &e[0..10];
                let curr_random = &e[10..];
                assert!(
                    prev_timestamp < curr_timestamp
                        || (prev_timestamp == curr_timestamp && prev_random < curr_random)
                );
                prev_timestamp = curr_timestamp;
                prev_random = curr_random;
            }
        });
    }

    /// Sets random bits properly
    #[test]
    fn sets_random_bits_properly() {
        // count '1' of each bit of the random field
        let mut bins = [0u32; 80];
        for _ in 0..N_SAMPLES {
            let mut num = ulid().unwrap().parse::<Ulid>().unwrap().random();
            for e in bins.iter_mut() {
                *e += (num & 1) as u32;
                num >>= 1;
            }
        }

        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for (i, e) in bins.iter().enumerate() {
            let p = *e as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {i}: {p}");
        }
    }

    /// Generates no IDs sharing same timestamp and random component under multithreading
    #[test]
    fn generates_no_ids_sharing_same_timestamp_and_random_component_under_multithreading(
    ) -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(ulid_monotonic().unwrap()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {err:?}"))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            s.insert(e);
        }

        assert_eq!(s.len(), 4 * 10_000);
        Ok(())
    }
}
