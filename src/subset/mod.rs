//! Cardinality-constrained subset selection.
//!
//! Picks `K` of `N` candidate values so that, merged with an archive, the
//! resulting front is as evenly spaced as possible. The caller's
//! evolutionary driver owns the loop; this module supplies the problem and
//! its operators.
//!
//! # Capabilities
//!
//! - [`Problem`]: dimensions and batch scoring, implemented by [`SubsetProblem`]
//! - [`Sampling`]: initial population, implemented by [`RandomSubsetSampling`]
//! - [`Crossover`]: 2 parents to 1 offspring, implemented by [`SharedBitCrossover`]
//! - [`Mutation`]: batch perturbation, implemented by [`SwapMutation`]
//!
//! # Key Types
//!
//! - [`SelectionMask`]: which candidates are selected
//! - [`Evaluation`] / [`BatchEvaluation`]: objective and constraint values
//! - [`SubsetConfig`]: target cardinality, population size, seed
//!
//! # Example
//!
//! ```
//! use u_subset::subset::{
//!     Crossover, Mutation, Problem, RandomSubsetSampling, Sampling, SharedBitCrossover,
//!     SubsetConfig, SubsetProblem, SwapMutation,
//! };
//!
//! let config = SubsetConfig::new(3).with_population_size(10).with_seed(42);
//! let problem = SubsetProblem::from_config(
//!     vec![0.05, 0.2, 0.45, 0.5, 0.7, 0.9],
//!     vec![0.0, 1.0],
//!     &config,
//! )
//! .unwrap();
//! let mut rng = config.rng();
//!
//! let population = RandomSubsetSampling.sample(&problem, config.population_size, &mut rng);
//! let matings: Vec<_> = population
//!     .chunks(2)
//!     .map(|p| (p[0].clone(), p[1].clone()))
//!     .collect();
//! let offspring = SharedBitCrossover.crossover(&problem, &matings, &mut rng);
//! let offspring = SwapMutation.mutate(&problem, offspring, &mut rng);
//!
//! let scores = problem.evaluate_batch(&offspring);
//! assert_eq!(scores.feasible_count(), offspring.len());
//! ```

mod config;
mod mask;
pub mod operators;
mod problem;
mod types;

pub use config::SubsetConfig;
pub use mask::SelectionMask;
pub use operators::{RandomSubsetSampling, SharedBitCrossover, SwapMutation};
pub use problem::SubsetProblem;
pub use types::{BatchEvaluation, Crossover, Evaluation, Mutation, Problem, Sampling};
