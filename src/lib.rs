//! Cardinality-constrained subset selection for front diversification.
//!
//! Given a pool of `N` real-valued candidates, an archive of values already
//! committed to a front, and a target count `K`, pick exactly `K` candidates
//! so that the merged, sorted front is as evenly spaced as possible.
//!
//! The crate provides the four pieces an evolutionary driver needs:
//!
//! - **Evaluation**: [`SubsetProblem`](subset::SubsetProblem) scores a
//!   selection mask (spacing objective + quadratic cardinality penalty).
//! - **Sampling**: [`RandomSubsetSampling`](subset::RandomSubsetSampling)
//!   builds masks with exactly `K` bits set.
//! - **Crossover**: [`SharedBitCrossover`](subset::SharedBitCrossover)
//!   keeps bits common to both parents and fills up to `K` from the rest.
//! - **Mutation**: [`SwapMutation`](subset::SwapMutation) swaps one selected
//!   index for one unselected index.
//!
//! # Architecture
//!
//! The generational loop, survival selection and termination belong to the
//! caller. Every randomized operation takes an explicit [`rand::Rng`] handle;
//! see [`random`] for seeded and per-worker generators.

pub mod error;
pub mod random;
pub mod subset;

pub use error::{Result, SubsetError};
