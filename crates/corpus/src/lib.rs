//! # Minwise Corpus (`corpus`)
//!
//! Boolean feature-vector datasets consumed by the similarity experiments.
//!
//! ## Contract
//!
//! - Vectors are produced upstream by a feature-extraction pipeline; this crate
//!   only holds and validates them.
//! - Every vector in a [`Dataset`] has the same length `L` (the vocabulary
//!   size).
//! - Documents iterate in [`DocumentId`] order, never insertion or hash order.
//!
//! ## Example Usage
//!
//! ```
//! use corpus::{Dataset, FeatureVector};
//!
//! let dataset = Dataset::from_documents([
//!     ("d0", FeatureVector::new(vec![true, true, false, false])),
//!     ("d1", FeatureVector::new(vec![true, false, true, false])),
//! ])
//! .unwrap();
//!
//! assert_eq!(dataset.dimension(), 4);
//! assert_eq!(dataset.len(), 2);
//! ```

mod error;
mod load;
mod types;

pub use crate::error::CorpusError;
pub use crate::load::{load_dataset, parse_dataset};
pub use crate::types::{Dataset, DocumentId, FeatureVector, LabeledDataset};
