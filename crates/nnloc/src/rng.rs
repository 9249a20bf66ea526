//! Reproducible stream splitting.
//!
//! `PointIndex::build` needs two random draws that must not interfere: the
//! shear of the trapezoidal map and the border shuffle. Each gets its own
//! `StdRng`, seeded from one draw of the caller's generator passed through
//! SplitMix64 so neighbouring draws still give unrelated streams.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// SplitMix64 finalizer.
#[inline]
pub(crate) fn mix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e3779b97f4a7c15);
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58476d1ce4e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d049bb133111eb);
    x ^ (x >> 31)
}

/// Child generator seeded from a single draw of `parent`.
pub(crate) fn fork<R: RngCore + ?Sized>(parent: &mut R) -> StdRng {
    StdRng::seed_from_u64(mix(parent.next_u64()))
}
