//! Capability traits and evaluation results.
//!
//! An evolutionary driver composes four independent capabilities:
//! a [`Problem`] to score masks, a [`Sampling`] to build the first
//! population, a [`Crossover`] to recombine parents, and a [`Mutation`] to
//! perturb offspring. None of them knows about generations or termination.

use super::mask::SelectionMask;
use rand::Rng;

/// Score of a single mask.
///
/// Both values are minimized. A mask is feasible iff `constraint == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Standard deviation of consecutive gaps in the merged front.
    pub objective: f64,

    /// Squared deviation of the selection count from the target.
    pub constraint: f64,
}

impl Evaluation {
    /// Returns `true` if the mask selects exactly the target count.
    pub fn is_feasible(&self) -> bool {
        self.constraint == 0.0
    }
}

/// Scores of a batch of masks, one row per mask, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchEvaluation {
    /// Objective column.
    pub objectives: Vec<f64>,

    /// Constraint column.
    pub constraints: Vec<f64>,
}

impl BatchEvaluation {
    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    /// The evaluation of row `i`.
    pub fn get(&self, i: usize) -> Evaluation {
        Evaluation {
            objective: self.objectives[i],
            constraint: self.constraints[i],
        }
    }

    /// Number of rows with a zero constraint value.
    pub fn feasible_count(&self) -> usize {
        self.constraints.iter().filter(|&&g| g == 0.0).count()
    }

    /// Index of the feasible row with the lowest objective, if any.
    pub fn best_feasible(&self) -> Option<usize> {
        (0..self.len())
            .filter(|&i| self.constraints[i] == 0.0)
            .min_by(|&a, &b| self.objectives[a].total_cmp(&self.objectives[b]))
    }
}

impl FromIterator<Evaluation> for BatchEvaluation {
    fn from_iter<T: IntoIterator<Item = Evaluation>>(iter: T) -> Self {
        let (objectives, constraints) = iter
            .into_iter()
            .map(|e| (e.objective, e.constraint))
            .unzip();
        Self {
            objectives,
            constraints,
        }
    }
}

/// Problem capability: dimensions and batch scoring.
///
/// `Send + Sync` because batch evaluation may fan out across threads.
pub trait Problem: Send + Sync {
    /// Number of decision variables (the candidate count `N`).
    fn n_var(&self) -> usize;

    /// Number of objectives.
    fn n_obj(&self) -> usize {
        1
    }

    /// Number of constraints.
    fn n_constr(&self) -> usize {
        1
    }

    /// Inclusive lower and upper bound of every variable.
    fn bounds(&self) -> (u8, u8) {
        (0, 1)
    }

    /// Target cardinality `K`.
    fn n_max(&self) -> usize;

    /// Whether batch operations on this problem may run on the rayon pool.
    ///
    /// Read by batch evaluation and by [`Mutation`] implementations.
    fn parallel(&self) -> bool {
        false
    }

    /// Scores every mask independently.
    fn evaluate_batch(&self, masks: &[SelectionMask]) -> BatchEvaluation;
}

/// Sampling capability: builds an initial population.
pub trait Sampling {
    /// Returns `n_samples` masks for `problem`.
    fn sample<P: Problem, R: Rng>(
        &self,
        problem: &P,
        n_samples: usize,
        rng: &mut R,
    ) -> Vec<SelectionMask>;
}

/// Crossover capability: combines parent groups into offspring.
pub trait Crossover {
    /// Parents consumed per mating.
    const N_PARENTS: usize;

    /// Offspring produced per mating.
    const N_OFFSPRING: usize;

    /// Produces offspring for each mating, in input order.
    fn crossover<P: Problem, R: Rng>(
        &self,
        problem: &P,
        matings: &[(SelectionMask, SelectionMask)],
        rng: &mut R,
    ) -> Vec<SelectionMask>;
}

/// Mutation capability: perturbs a batch of masks.
pub trait Mutation {
    /// Returns the batch with each mask possibly changed, in input order.
    fn mutate<P: Problem, R: Rng>(
        &self,
        problem: &P,
        masks: Vec<SelectionMask>,
        rng: &mut R,
    ) -> Vec<SelectionMask>;
}
