//! Spacing objective and cardinality constraint.
//!
//! [`SubsetProblem`] owns the candidate pool, the archive and the target
//! cardinality `K`. Scoring a mask merges the archive with the selected
//! candidates, sorts the result, and measures how uneven the consecutive
//! gaps are.

use super::config::SubsetConfig;
use super::mask::SelectionMask;
use super::types::{BatchEvaluation, Evaluation, Problem};
use crate::error::{Result, SubsetError, ValueSource};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Selection of `K` candidates that spaces a front as evenly as possible.
///
/// # Examples
///
/// ```
/// use u_subset::subset::{SelectionMask, SubsetProblem};
///
/// let problem = SubsetProblem::new(vec![0.1, 0.5, 0.9, 0.3], vec![0.0, 1.0], 2).unwrap();
/// let eval = problem.evaluate(&SelectionMask::from_indices(4, &[0, 2]));
/// assert!((eval.objective - 0.3299).abs() < 1e-4);
/// assert!(eval.is_feasible());
/// ```
#[derive(Debug, Clone)]
pub struct SubsetProblem {
    candidates: Vec<f64>,
    archive: Vec<f64>,
    k: usize,
    parallel: bool,
}

impl SubsetProblem {
    /// Creates a problem selecting `k` of `candidates`, scored together
    /// with `archive`.
    ///
    /// Returns `Err` if the pool is empty, `k` is outside `1..=candidates.len()`,
    /// or any value is NaN or infinite.
    pub fn new(candidates: Vec<f64>, archive: Vec<f64>, k: usize) -> Result<Self> {
        Self::from_config(candidates, archive, &SubsetConfig::new(k))
    }

    /// Creates a problem from a [`SubsetConfig`].
    pub fn from_config(
        candidates: Vec<f64>,
        archive: Vec<f64>,
        config: &SubsetConfig,
    ) -> Result<Self> {
        config.validate(candidates.len())?;
        check_finite(&candidates, ValueSource::Candidates)?;
        check_finite(&archive, ValueSource::Archive)?;

        Ok(Self {
            candidates,
            archive,
            k: config.max_selected,
            parallel: config.parallel,
        })
    }

    /// Enables or disables parallel batch evaluation and mutation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn candidates(&self) -> &[f64] {
        &self.candidates
    }

    pub fn archive(&self) -> &[f64] {
        &self.archive
    }

    /// Target cardinality `K`.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Candidate values selected by `mask`, in index order.
    pub fn selected_values(&self, mask: &SelectionMask) -> Vec<f64> {
        debug_assert_eq!(
            mask.len(),
            self.candidates.len(),
            "mask length must equal n_var"
        );
        self.candidates
            .iter()
            .zip(mask.iter())
            .filter_map(|(&v, selected)| selected.then_some(v))
            .collect()
    }

    /// Archive plus selected candidates, sorted ascending.
    pub fn merged_front(&self, mask: &SelectionMask) -> Vec<f64> {
        let mut front = self.archive.clone();
        front.extend(self.selected_values(mask));
        front.sort_by(f64::total_cmp);
        front
    }

    /// Scores one mask.
    ///
    /// The objective is the population standard deviation of the gaps
    /// between consecutive points of [`merged_front`](Self::merged_front);
    /// with fewer than two points it is `f64::INFINITY`. The constraint is
    /// `(K - popcount)^2`.
    pub fn evaluate(&self, mask: &SelectionMask) -> Evaluation {
        let front = self.merged_front(mask);
        let objective = gap_std_dev(&front).unwrap_or(f64::INFINITY);

        let deviation = self.k as f64 - mask.popcount() as f64;

        Evaluation {
            objective,
            constraint: deviation * deviation,
        }
    }

    fn evaluate_rows(&self, masks: &[SelectionMask]) -> Vec<Evaluation> {
        #[cfg(feature = "parallel")]
        if self.parallel {
            return masks.par_iter().map(|m| self.evaluate(m)).collect();
        }

        masks.iter().map(|m| self.evaluate(m)).collect()
    }
}

impl Problem for SubsetProblem {
    fn n_var(&self) -> usize {
        self.candidates.len()
    }

    fn n_max(&self) -> usize {
        self.k
    }

    fn parallel(&self) -> bool {
        self.parallel
    }

    fn evaluate_batch(&self, masks: &[SelectionMask]) -> BatchEvaluation {
        let batch: BatchEvaluation = self.evaluate_rows(masks).into_iter().collect();

        log::debug!(
            "evaluated {} masks: {} feasible",
            batch.len(),
            batch.feasible_count()
        );
        batch
    }
}

/// Population standard deviation of consecutive differences of a sorted
/// sequence. `None` when there are no differences.
fn gap_std_dev(sorted: &[f64]) -> Option<f64> {
    if sorted.len() < 2 {
        return None;
    }

    let gaps: Vec<f64> = sorted.windows(2).map(|w| w[1] - w[0]).collect();
    let n = gaps.len() as f64;
    let mean = gaps.iter().sum::<f64>() / n;
    let variance = gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt())
}

fn check_finite(values: &[f64], origin: ValueSource) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SubsetError::NonFiniteValue {
            origin,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}
