//! # Minwise Sketch (`sketch`)
//!
//! Random-permutation MinHash over boolean feature vectors.
//!
//! ## Contract
//!
//! - A [`PermutationPool`] holds distinct permutations of `0..L` and only grows;
//!   [`PermutationPool::ensure`] appends new draws and never reorders or drops
//!   earlier ones.
//! - [`generate_signatures`] always uses the entire current pool, so a
//!   signature at a larger sketch size extends the one at a smaller size.
//! - With [`SketchConfig::seed`] set, pools and signatures are reproducible.
//!
//! ## Core Pipeline
//!
//! 1.  **Pool growth**: uniformly random permutations are drawn by shuffling
//!     `0..L`. Draws equal to a pooled permutation are rejected; duplicate
//!     checks go through an xxh3 digest index instead of a linear scan.
//!
//! 2.  **Signatures**: for each document and permutation, the first feature
//!     index (in permutation order) whose bit is set becomes the next
//!     signature element. All-zero vectors follow the configured
//!     [`EmptyVectorPolicy`]. Documents can be processed in parallel via Rayon.
//!
//! ## Example Usage
//!
//! ```
//! use corpus::{Dataset, FeatureVector};
//! use sketch::{generate_signatures, PermutationPool, SketchConfig};
//!
//! let dataset = Dataset::from_documents([
//!     ("d0", FeatureVector::new(vec![true, true, false, false])),
//!     ("d1", FeatureVector::new(vec![true, false, true, false])),
//! ])
//! .unwrap();
//!
//! let cfg = SketchConfig::new().with_seed(7);
//! let mut pool = PermutationPool::from_config(dataset.dimension(), &cfg, 0);
//! pool.ensure(16).unwrap();
//!
//! let signatures = generate_signatures(&dataset, &pool, &cfg).unwrap();
//! assert_eq!(signatures.get(&"d0".into()).unwrap().len(), 16);
//! ```

pub mod config;
mod permutation;
mod signature;

pub use crate::config::{EmptyVectorPolicy, SketchConfig, SketchError};
pub use crate::permutation::{Permutation, PermutationPool};
pub use crate::signature::{generate_signatures, Signature, Signatures};
