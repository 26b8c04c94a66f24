//! Subset-selection configuration.
//!
//! [`SubsetConfig`] carries the cardinality target and the knobs shared by
//! the operators (population size for sampling, parallelism, seed).

use crate::error::{Result, SubsetError};
use crate::random::create_rng;
use rand::rngs::StdRng;

/// Configuration for a subset-selection run.
///
/// # Defaults
///
/// ```
/// use u_subset::subset::SubsetConfig;
///
/// let config = SubsetConfig::default();
/// assert_eq!(config.max_selected, 1);
/// assert_eq!(config.population_size, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_subset::subset::SubsetConfig;
///
/// let config = SubsetConfig::new(5)
///     .with_population_size(40)
///     .with_parallel(false)
///     .with_seed(7);
/// assert!(config.validate(10).is_ok());
/// assert!(config.validate(4).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubsetConfig {
    /// Target cardinality `K`: how many candidates a feasible mask selects.
    pub max_selected: usize,

    /// Number of masks the sampler produces for the initial population.
    pub population_size: usize,

    /// Whether batch evaluation and batch mutation use rayon.
    ///
    /// Carried into [`SubsetProblem`](super::SubsetProblem) and read back
    /// through [`Problem::parallel`](super::Problem::parallel). Ignored when
    /// the crate is built without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SubsetConfig {
    fn default() -> Self {
        Self {
            max_selected: 1,
            population_size: 100,
            parallel: true,
            seed: None,
        }
    }
}

impl SubsetConfig {
    /// Creates a configuration selecting `max_selected` candidates.
    pub fn new(max_selected: usize) -> Self {
        Self {
            max_selected,
            ..Self::default()
        }
    }

    /// Sets the target cardinality.
    pub fn with_max_selected(mut self, k: usize) -> Self {
        self.max_selected = k;
        self
    }

    /// Sets the initial population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Enables or disables parallel batch operations.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds a generator from the configured seed, or a random one.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        }
    }

    /// Validates the configuration against a pool of `n_candidates`.
    pub fn validate(&self, n_candidates: usize) -> Result<()> {
        if n_candidates == 0 {
            return Err(SubsetError::EmptyCandidates);
        }
        if self.max_selected == 0 || self.max_selected > n_candidates {
            return Err(SubsetError::InvalidCardinality {
                k: self.max_selected,
                n: n_candidates,
            });
        }
        if self.population_size == 0 {
            return Err(SubsetError::InvalidPopulationSize);
        }
        Ok(())
    }
}
