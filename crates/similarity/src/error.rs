use thiserror::Error;

/// Errors returned by matrix comparison.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimilarityError {
    /// The estimate lacks a pair present in the baseline.
    #[error("approximate matrix has no score for pair ({left}, {right})")]
    MissingKey { left: String, right: String },
}
