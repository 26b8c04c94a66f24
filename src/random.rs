//! Seeded random sources.
//!
//! No operator in this crate touches a global generator. Callers pass a
//! `&mut R: Rng` explicitly; the helpers here build reproducible ones.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from a seed.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_subset::random::create_rng;
///
/// let a: u64 = create_rng(7).random();
/// let b: u64 = create_rng(7).random();
/// assert_eq!(a, b);
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Derives `n` independent child generators from `rng`.
///
/// Seeds are drawn sequentially from the parent, so the children depend only
/// on the parent's state and not on how they are later scheduled across
/// threads.
pub fn derive_rngs<R: Rng>(rng: &mut R, n: usize) -> Vec<StdRng> {
    (0..n).map(|_| create_rng(rng.random())).collect()
}
