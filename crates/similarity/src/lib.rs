//! # Minwise Similarity (`similarity`)
//!
//! Pairwise Jaccard similarity matrices, computed exactly from feature vectors
//! or estimated from min-wise signatures, and the error between the two.
//!
//! ## Core Types
//!
//! - [`SimilarityMatrix`]: one score per unordered document pair, keyed
//!   `(smaller, larger)`.
//! - [`SimilarityMode`]: `Exact` (baseline) or `Sketch` (estimate).
//! - [`ErrorValue`]: root-sum-of-squares discrepancy plus the pair count.
//!
//! Scores always lie in `[0.0, 1.0]`. A pair whose union is empty scores `0.0`.
//!
//! ## Example Usage
//!
//! ```
//! use corpus::{Dataset, FeatureVector};
//! use similarity::{build_exact, root_sum_squares};
//!
//! let dataset = Dataset::from_documents([
//!     ("d0", FeatureVector::new(vec![true, true, false, false])),
//!     ("d1", FeatureVector::new(vec![true, false, true, false])),
//! ])
//! .unwrap();
//!
//! let baseline = build_exact(&dataset, false);
//! let score = baseline.get(&"d0".into(), &"d1".into()).unwrap();
//! assert!((score - 1.0 / 3.0).abs() < 1e-12);
//!
//! let err = root_sum_squares(&baseline, &baseline).unwrap();
//! assert_eq!(err.value, 0.0);
//! ```

mod error;
mod evaluate;
mod jaccard;
mod matrix;

pub use crate::error::SimilarityError;
pub use crate::evaluate::{root_sum_squares, ErrorValue, ERROR_METRIC};
pub use crate::jaccard::{exact_jaccard, sketch_jaccard};
pub use crate::matrix::{
    build_exact, build_matrix, build_sketch, SimilarityInput, SimilarityMatrix, SimilarityMode,
};
