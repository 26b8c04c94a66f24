//! Errors raised while constructing a subset-selection problem.
//!
//! Operators never fail; only construction and configuration are checked.

use std::fmt;

/// Which input sequence a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Candidates,
    Archive,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Candidates => f.write_str("candidates"),
            ValueSource::Archive => f.write_str("archive"),
        }
    }
}

/// Error type for problem construction and config validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubsetError {
    #[error("candidate pool must not be empty")]
    EmptyCandidates,

    #[error("max_selected must satisfy 0 < k <= n (k = {k}, n = {n})")]
    InvalidCardinality { k: usize, n: usize },

    #[error("non-finite value {value} in {origin} at index {index}")]
    NonFiniteValue {
        origin: ValueSource,
        index: usize,
        value: f64,
    },

    #[error("population_size must be at least 1")]
    InvalidPopulationSize,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SubsetError>;
