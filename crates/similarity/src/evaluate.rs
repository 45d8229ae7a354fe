//! Discrepancy between a baseline matrix and an estimate.

use serde::{Deserialize, Serialize};

use crate::error::SimilarityError;
use crate::matrix::SimilarityMatrix;

/// Name of the metric [`root_sum_squares`] computes, as written into reports.
pub const ERROR_METRIC: &str = "root_sum_squares";

/// Result of comparing two similarity matrices.
///
/// `value` is the square root of the summed squared differences; it is not
/// averaged and grows with the number of pairs. [`ErrorValue::rmse`] gives the
/// per-pair figure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ErrorValue {
    pub value: f64,
    /// Number of baseline pairs compared.
    pub pairs: usize,
}

impl ErrorValue {
    /// Root-mean-square error per pair; `0.0` when no pairs were compared.
    pub fn rmse(&self) -> f64 {
        if self.pairs == 0 {
            0.0
        } else {
            self.value / (self.pairs as f64).sqrt()
        }
    }
}

/// `sqrt(sum((baseline[i,j] - approx[i,j])^2))` over every baseline pair.
///
/// Every pair in `baseline` must also be present in `approx`; extra pairs in
/// `approx` are ignored.
pub fn root_sum_squares(
    baseline: &SimilarityMatrix,
    approx: &SimilarityMatrix,
) -> Result<ErrorValue, SimilarityError> {
    let mut sum = 0.0f64;
    for (a, b, expected) in baseline.iter() {
        let estimate = approx
            .get(a, b)
            .ok_or_else(|| SimilarityError::MissingKey {
                left: a.to_string(),
                right: b.to_string(),
            })?;
        let diff = expected - estimate;
        sum += diff * diff;
    }
    Ok(ErrorValue {
        value: sum.sqrt(),
        pairs: baseline.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpus::DocumentId;

    fn matrix(entries: &[(&str, &str, f64)]) -> SimilarityMatrix {
        let mut m = SimilarityMatrix::new();
        for &(a, b, s) in entries {
            m.insert(DocumentId::from(a), DocumentId::from(b), s);
        }
        m
    }

    #[test]
    fn matrix_against_itself_is_zero() {
        let m = matrix(&[("a", "b", 0.3), ("a", "c", 0.9), ("b", "c", 0.0)]);
        let err = root_sum_squares(&m, &m).unwrap();
        assert_eq!(err.value, 0.0);
        assert_eq!(err.pairs, 3);
    }

    #[test]
    fn sums_squares_without_averaging() {
        let base = matrix(&[("a", "b", 1.0), ("a", "c", 0.0)]);
        let est = matrix(&[("a", "b", 0.7), ("a", "c", 0.4)]);
        let err = root_sum_squares(&base, &est).unwrap();
        // sqrt(0.09 + 0.16) = 0.5
        assert!((err.value - 0.5).abs() < 1e-12);
        assert!((err.rmse() - 0.5 / 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn missing_pair_is_an_error() {
        let base = matrix(&[("a", "b", 1.0), ("b", "c", 0.5)]);
        let est = matrix(&[("a", "b", 1.0)]);
        assert_eq!(
            root_sum_squares(&base, &est),
            Err(SimilarityError::MissingKey {
                left: "b".into(),
                right: "c".into(),
            })
        );
    }

    #[test]
    fn extra_pairs_in_estimate_are_ignored() {
        let base = matrix(&[("a", "b", 0.5)]);
        let est = matrix(&[("a", "b", 0.5), ("x", "y", 1.0)]);
        assert_eq!(root_sum_squares(&base, &est).unwrap().value, 0.0);
    }

    #[test]
    fn empty_baseline_scores_zero() {
        let empty = SimilarityMatrix::new();
        let err = root_sum_squares(&empty, &empty).unwrap();
        assert_eq!(err, ErrorValue { value: 0.0, pairs: 0 });
        assert_eq!(err.rmse(), 0.0);
    }
}
