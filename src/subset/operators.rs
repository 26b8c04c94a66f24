//! Cardinality-aware genetic operators on selection masks.
//!
//! # Sampling
//!
//! - [`sample_mask`] / [`RandomSubsetSampling`]: uniform random `K`-subset
//!   via a full permutation of indices
//!
//! # Crossover
//!
//! - [`subset_crossover`] / [`SharedBitCrossover`]: inherit bits set in both
//!   parents, fill up to `K` from bits set in exactly one
//!
//! # Mutation
//!
//! - [`swap_mutation`] / [`SwapMutation`]: turn one selected bit off and one
//!   unselected bit on, O(n)
//!
//! All operators are total: degenerate inputs produce a well-defined mask
//! rather than an error.

use super::mask::SelectionMask;
use super::types::{Crossover, Mutation, Problem, Sampling};
use crate::random::derive_rngs;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

// ============================================================================
// Sampling
// ============================================================================

/// Builds a mask of length `n` with exactly `k` bits set.
///
/// Shuffles `0..n` and selects the first `k` indices, so every `k`-subset is
/// equally likely.
///
/// # Panics
/// Panics if `k > n`.
pub fn sample_mask<R: Rng>(n: usize, k: usize, rng: &mut R) -> SelectionMask {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    SelectionMask::from_indices(n, &perm[..k])
}

/// Initial population sampler: each mask selects exactly `K` candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSubsetSampling;

impl Sampling for RandomSubsetSampling {
    fn sample<P: Problem, R: Rng>(
        &self,
        problem: &P,
        n_samples: usize,
        rng: &mut R,
    ) -> Vec<SelectionMask> {
        let (n, k) = (problem.n_var(), problem.n_max());
        let masks: Vec<SelectionMask> = (0..n_samples).map(|_| sample_mask(n, k, rng)).collect();

        log::debug!("sampled {} masks (n = {n}, k = {k})", masks.len());
        masks
    }
}

// ============================================================================
// Crossover
// ============================================================================

/// Combines two parents into one offspring targeting `k` selected bits.
///
/// # Algorithm
///
/// 1. Bits set in both parents are inherited unconditionally
/// 2. `remaining = k - |shared|` bits are drawn uniformly without replacement
///    from the bits set in exactly one parent
/// 3. If fewer than `remaining` such bits exist, all of them are taken and the
///    offspring falls short of `k`
///
/// When the shared bits alone exceed `k`, no further bits are added and the
/// offspring keeps more than `k` selections. This is left uncorrected; the
/// evaluator penalizes it through the constraint value.
pub fn subset_crossover<R: Rng>(
    parent1: &SelectionMask,
    parent2: &SelectionMask,
    k: usize,
    rng: &mut R,
) -> SelectionMask {
    debug_assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );

    let mut child = parent1.and(parent2);
    let shared = child.popcount();

    if shared > k {
        log::warn!(
            "parents share {shared} selected bits, above target {k}; offspring left over-selected"
        );
        return child;
    }

    let mut disputed = parent1.xor(parent2).selected_indices();
    disputed.shuffle(rng);
    for &i in disputed.iter().take(k - shared) {
        child.set(i, true);
    }

    child
}

/// Two-parent, one-offspring crossover built on [`subset_crossover`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedBitCrossover;

impl Crossover for SharedBitCrossover {
    const N_PARENTS: usize = 2;
    const N_OFFSPRING: usize = 1;

    fn crossover<P: Problem, R: Rng>(
        &self,
        problem: &P,
        matings: &[(SelectionMask, SelectionMask)],
        rng: &mut R,
    ) -> Vec<SelectionMask> {
        let k = problem.n_max();
        let offspring: Vec<SelectionMask> = matings
            .iter()
            .map(|(p1, p2)| subset_crossover(p1, p2, k, rng))
            .collect();

        log::debug!("crossover produced {} offspring", offspring.len());
        offspring
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Swaps one selected index for one unselected index.
///
/// Both indices are drawn uniformly and independently. Returns `false` and
/// leaves the mask untouched when it has no selected or no unselected bit.
///
/// # Complexity
/// O(n)
pub fn swap_mutation<R: Rng>(mask: &mut SelectionMask, rng: &mut R) -> bool {
    let unselected = mask.unselected_indices();
    let selected = mask.selected_indices();

    if unselected.is_empty() || selected.is_empty() {
        log::trace!(
            "swap skipped: {} selected, {} unselected",
            selected.len(),
            unselected.len()
        );
        return false;
    }

    let on = unselected[rng.random_range(0..unselected.len())];
    let off = selected[rng.random_range(0..selected.len())];
    mask.set(on, true);
    mask.set(off, false);
    true
}

/// Batch mutation applying [`swap_mutation`] to every mask.
///
/// Runs on the rayon pool when [`Problem::parallel`] is set. Each mask gets
/// its own generator derived from the caller's, so the output for a given
/// seed is the same either way.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapMutation;

impl Mutation for SwapMutation {
    fn mutate<P: Problem, R: Rng>(
        &self,
        problem: &P,
        mut masks: Vec<SelectionMask>,
        rng: &mut R,
    ) -> Vec<SelectionMask> {
        let mut rngs = derive_rngs(rng, masks.len());
        let changed = mutate_rows(&mut masks, &mut rngs, problem.parallel());

        log::debug!("mutated {changed} of {} masks", masks.len());
        masks
    }
}

/// Applies [`swap_mutation`] row by row; returns how many masks changed.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
fn mutate_rows(masks: &mut [SelectionMask], rngs: &mut [StdRng], parallel: bool) -> usize {
    #[cfg(feature = "parallel")]
    if parallel {
        return masks
            .par_iter_mut()
            .zip(rngs.par_iter_mut())
            .map(|(mask, r)| swap_mutation(mask, r))
            .filter(|&changed| changed)
            .count();
    }

    masks
        .iter_mut()
        .zip(rngs.iter_mut())
        .map(|(mask, r)| swap_mutation(mask, r))
        .filter(|&changed| changed)
        .count()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::subset::{BatchEvaluation, SubsetConfig, SubsetProblem};
    use proptest::prelude::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn problem(n: usize, k: usize) -> SubsetProblem {
        let candidates: Vec<f64> = (0..n).map(|i| i as f64).collect();
        SubsetProblem::new(candidates, vec![], k).unwrap()
    }

    // ---- Sampling ----

    #[test]
    fn test_sampling_exact_cardinality() {
        let mut rng = create_rng(42);
        let masks = RandomSubsetSampling.sample(&problem(4, 2), 100, &mut rng);
        assert_eq!(masks.len(), 100);
        for mask in &masks {
            assert_eq!(mask.len(), 4);
            assert_eq!(mask.popcount(), 2);
        }
    }

    #[test]
    fn test_sampling_uniform_over_subsets() {
        let mut rng = create_rng(7);
        let masks = RandomSubsetSampling.sample(&problem(4, 2), 6000, &mut rng);

        let mut counts: HashMap<Vec<usize>, u32> = HashMap::new();
        for mask in &masks {
            *counts.entry(mask.selected_indices()).or_default() += 1;
        }

        // Six 2-subsets of {0,1,2,3}, ~1000 each.
        assert_eq!(counts.len(), 6, "expected all subsets, got {counts:?}");
        for &c in counts.values() {
            assert!(
                c > 800 && c < 1200,
                "expected roughly uniform, got {counts:?}"
            );
        }
    }

    #[test]
    fn test_sample_full_and_single() {
        let mut rng = create_rng(1);
        assert_eq!(sample_mask(5, 5, &mut rng).popcount(), 5);
        assert_eq!(sample_mask(5, 1, &mut rng).popcount(), 1);
    }

    #[test]
    fn test_sampling_reproducible() {
        let p = problem(10, 3);
        let a = RandomSubsetSampling.sample(&p, 20, &mut create_rng(5));
        let b = RandomSubsetSampling.sample(&p, 20, &mut create_rng(5));
        assert_eq!(a, b);
    }

    // ---- Crossover ----

    #[test]
    fn test_crossover_keeps_shared_bits() {
        let mut rng = create_rng(42);
        let p1 = SelectionMask::from_indices(8, &[0, 1, 2, 3]);
        let p2 = SelectionMask::from_indices(8, &[0, 1, 6, 7]);
        let shared = p1.and(&p2);
        let either = p1.xor(&p2);

        for _ in 0..100 {
            let child = subset_crossover(&p1, &p2, 4, &mut rng);
            assert_eq!(child.popcount(), 4);
            assert!(child[0] && child[1], "shared bits must survive: {child:?}");
            for i in child.selected_indices() {
                assert!(shared[i] || either[i], "bit {i} came from neither parent");
            }
        }
    }

    #[test]
    fn test_crossover_identical_parents() {
        let mut rng = create_rng(42);
        let p = SelectionMask::from_indices(6, &[1, 4]);
        assert_eq!(subset_crossover(&p, &p, 2, &mut rng), p);
    }

    #[test]
    fn test_crossover_short_of_disputed_bits() {
        let mut rng = create_rng(42);
        // Shared {0}, disputed {1, 2}; k = 5 asks for 4 more than exist.
        let p1 = SelectionMask::from_indices(6, &[0, 1]);
        let p2 = SelectionMask::from_indices(6, &[0, 2]);
        let child = subset_crossover(&p1, &p2, 5, &mut rng);
        assert_eq!(child.selected_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_crossover_over_target_is_not_corrected() {
        let mut rng = create_rng(42);
        let p1 = SelectionMask::from_indices(6, &[0, 1, 2, 4]);
        let p2 = SelectionMask::from_indices(6, &[0, 1, 2, 5]);
        let child = subset_crossover(&p1, &p2, 2, &mut rng);
        assert_eq!(child.selected_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_crossover_batch_arity() {
        assert_eq!(SharedBitCrossover::N_PARENTS, 2);
        assert_eq!(SharedBitCrossover::N_OFFSPRING, 1);

        let p = problem(10, 3);
        let mut rng = create_rng(3);
        let parents = RandomSubsetSampling.sample(&p, 20, &mut rng);
        let matings: Vec<_> = parents
            .chunks(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect();

        let offspring = SharedBitCrossover.crossover(&p, &matings, &mut rng);
        assert_eq!(offspring.len(), 10);
        assert!(offspring.iter().all(|c| c.popcount() == 3));
    }

    // ---- Mutation ----

    #[test]
    fn test_swap_preserves_cardinality() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let original = sample_mask(10, 4, &mut rng);
            let mut mask = original.clone();
            assert!(swap_mutation(&mut mask, &mut rng));
            assert_eq!(mask.popcount(), 4);
            assert_eq!(mask.hamming_distance(&original), 2);
        }
    }

    #[test]
    fn test_swap_degenerate_is_noop() {
        let mut rng = create_rng(42);

        let mut none = SelectionMask::empty(5);
        assert!(!swap_mutation(&mut none, &mut rng));
        assert_eq!(none, SelectionMask::empty(5));

        let full = SelectionMask::from(vec![true; 5]);
        let mut mask = full.clone();
        assert!(!swap_mutation(&mut mask, &mut rng));
        assert_eq!(mask, full);
    }

    #[test]
    fn test_swap_single_option_each_side() {
        let mut rng = create_rng(42);
        let mut mask = SelectionMask::from_indices(2, &[0]);
        swap_mutation(&mut mask, &mut rng);
        assert_eq!(mask.selected_indices(), vec![1]);
    }

    #[test]
    fn test_mutation_batch_mixed() {
        let p = problem(4, 2);
        let masks = vec![
            SelectionMask::from_indices(4, &[0, 2]),
            SelectionMask::empty(4),
            SelectionMask::from(vec![true; 4]),
        ];

        let out = SwapMutation.mutate(&p, masks.clone(), &mut create_rng(42));
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].popcount(), 2);
        assert_eq!(out[0].hamming_distance(&masks[0]), 2);
        assert_eq!(out[1], masks[1]);
        assert_eq!(out[2], masks[2]);
    }

    #[test]
    fn test_parallel_mutation_matches_sequential() {
        let seq_problem = problem(30, 10).with_parallel(false);
        let par_problem = problem(30, 10).with_parallel(true);
        let masks = RandomSubsetSampling.sample(&seq_problem, 50, &mut create_rng(11));

        let seq = SwapMutation.mutate(&seq_problem, masks.clone(), &mut create_rng(99));
        let par = SwapMutation.mutate(&par_problem, masks, &mut create_rng(99));
        assert_eq!(seq, par);
    }

    /// Wraps a problem and counts how often its parallel flag is read.
    struct FlagCountingProblem {
        inner: SubsetProblem,
        reads: AtomicUsize,
    }

    impl Problem for FlagCountingProblem {
        fn n_var(&self) -> usize {
            self.inner.n_var()
        }

        fn n_max(&self) -> usize {
            self.inner.n_max()
        }

        fn parallel(&self) -> bool {
            self.reads.fetch_add(1, Ordering::Relaxed);
            self.inner.parallel()
        }

        fn evaluate_batch(&self, masks: &[SelectionMask]) -> BatchEvaluation {
            self.inner.evaluate_batch(masks)
        }
    }

    #[test]
    fn test_mutation_follows_config_parallel_flag() {
        let default_problem = problem(6, 2);
        assert_eq!(default_problem.parallel(), SubsetConfig::default().parallel);

        for parallel in [false, true] {
            let config = SubsetConfig::new(4).with_parallel(parallel);
            let pool: Vec<f64> = (0..12).map(|i| i as f64).collect();
            let inner = SubsetProblem::from_config(pool, vec![], &config).unwrap();
            let p = FlagCountingProblem {
                inner,
                reads: AtomicUsize::new(0),
            };
            assert_eq!(p.inner.parallel(), parallel);

            let masks = RandomSubsetSampling.sample(&p, 8, &mut create_rng(5));
            let out = SwapMutation.mutate(&p, masks, &mut create_rng(6));

            assert_eq!(p.reads.load(Ordering::Relaxed), 1);
            assert!(out.iter().all(|m| m.popcount() == 4));
        }
    }

    // ---- Integration: sample + crossover + mutation ----

    #[test]
    fn test_pipeline_stays_feasible() {
        let p = SubsetProblem::new(
            (0..20).map(|i| (i as f64 * 0.37).fract()).collect(),
            vec![0.0, 1.0],
            6,
        )
        .unwrap();
        let mut rng = create_rng(42);

        let mut population = RandomSubsetSampling.sample(&p, 30, &mut rng);
        for _ in 0..10 {
            let matings: Vec<_> = population
                .iter()
                .zip(population.iter().rev())
                .map(|(a, b)| (a.clone(), b.clone()))
                .collect();
            let offspring = SharedBitCrossover.crossover(&p, &matings, &mut rng);
            population = SwapMutation.mutate(&p, offspring, &mut rng);

            let batch = p.evaluate_batch(&population);
            assert_eq!(batch.feasible_count(), population.len());
        }
    }

    proptest! {
        #[test]
        fn prop_sample_has_k_bits(
            n in 1usize..40,
            k_seed in 0usize..1000,
            seed in any::<u64>(),
        ) {
            let k = k_seed % n + 1;
            let mask = sample_mask(n, k, &mut create_rng(seed));
            prop_assert_eq!(mask.len(), n);
            prop_assert_eq!(mask.popcount(), k);
        }

        #[test]
        fn prop_crossover_hits_k_from_feasible_parents(
            n in 2usize..40,
            k_seed in 0usize..1000,
            seed in any::<u64>(),
        ) {
            let k = k_seed % n + 1;
            let mut rng = create_rng(seed);
            let p1 = sample_mask(n, k, &mut rng);
            let p2 = sample_mask(n, k, &mut rng);
            let child = subset_crossover(&p1, &p2, k, &mut rng);
            prop_assert_eq!(child.popcount(), k);
        }

        #[test]
        fn prop_swap_is_distance_two(
            bits in proptest::collection::vec(any::<bool>(), 1..40),
            seed in any::<u64>(),
        ) {
            let original = SelectionMask::from(bits);
            let mut mask = original.clone();
            let swapped = swap_mutation(&mut mask, &mut create_rng(seed));

            prop_assert_eq!(mask.popcount(), original.popcount());
            let selected = original.popcount();
            let degenerate = selected == 0 || selected == original.len();
            let expected_distance = if degenerate { 0 } else { 2 };
            prop_assert_eq!(swapped, !degenerate);
            prop_assert_eq!(mask.hamming_distance(&original), expected_distance);
        }
    }
}
