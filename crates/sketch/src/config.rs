//! Configuration and error types for min-wise sketching.
//!
//! Nothing here touches I/O or the environment; a pool seeded from a fixed
//! `seed` yields the same permutations, and therefore the same signatures, on
//! every run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do when a document has no set feature under a permutation.
///
/// A vector with at least one set bit always yields an element for every
/// permutation, so this only ever applies to all-zero vectors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyVectorPolicy {
    /// Emit no element; the signature ends up shorter than the pool.
    #[default]
    Truncate,
    /// Fail with [`SketchError::EmptyFeatureVector`].
    Reject,
}

/// Configuration for pool sampling and signature generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SketchConfig {
    /// Seed for the permutation RNG. `None` draws the seed from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Generate signatures across documents with rayon.
    #[serde(default)]
    pub use_parallel: bool,
    /// Handling of all-zero feature vectors.
    #[serde(default)]
    pub empty_vector_policy: EmptyVectorPolicy,
}

impl SketchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the permutation RNG seed for reproducible pools.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn with_empty_vector_policy(mut self, policy: EmptyVectorPolicy) -> Self {
        self.empty_vector_policy = policy;
        self
    }
}

/// Errors returned by pool growth and signature generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SketchError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: &'static str },

    #[error("cannot draw {requested} distinct permutations of {dimension} features")]
    InsufficientPermutations { dimension: usize, requested: usize },

    #[error("permutation pool covers {pool} features but dataset vectors have {dataset}")]
    DimensionMismatch { pool: usize, dataset: usize },

    #[error("document '{doc_id}' has no set features")]
    EmptyFeatureVector { doc_id: String },
}
