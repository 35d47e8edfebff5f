//! Random component source

use rand::RngCore;

/// A trait that defines the minimum random number generator interface for [`MonotonicGenerator`]
/// and [`Engine`].
///
/// Every [`RngCore`] implements this trait. Uniqueness rather than secrecy is required of the
/// random field, so a fast seeded generator serves as well as the OS entropy source.
///
/// [`MonotonicGenerator`]: crate::MonotonicGenerator
/// [`Engine`]: crate::Engine
pub trait RandSource {
    /// Returns the next random value in the 80-bit range.
    fn next_random(&mut self) -> u128;
}

impl<T: RngCore + ?Sized> RandSource for T {
    fn next_random(&mut self) -> u128 {
        let hi = (self.next_u32() & 0xffff) as u128;
        let lo = self.next_u64() as u128;
        (hi << 64) | lo
    }
}

/// Draws a fresh 80-bit random component from `rng`.
pub fn next_random<R: RandSource + ?Sized>(rng: &mut R) -> u128 {
    rng.next_random()
}
