//! Pairwise similarity matrices.
//!
//! A matrix stores one score per unordered pair of distinct documents, keyed as
//! `(smaller, larger)` under the `DocumentId` order. Lookups normalize the key,
//! so `get(b, a)` reads the entry stored for `(a, b)`.

use std::collections::BTreeMap;

use corpus::{Dataset, DocumentId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sketch::Signatures;
use tracing::debug;

use crate::jaccard::{exact_jaccard, index_set, sorted_set_jaccard};

/// Which representation a matrix was computed from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMode {
    /// Full feature vectors; the baseline.
    Exact,
    /// Min-wise signatures; the estimate.
    Sketch,
}

/// Input to [`build_matrix`].
#[derive(Debug, Clone, Copy)]
pub enum SimilarityInput<'a> {
    Exact(&'a Dataset),
    Sketch(&'a Signatures),
}

impl SimilarityInput<'_> {
    pub fn mode(&self) -> SimilarityMode {
        match self {
            SimilarityInput::Exact(_) => SimilarityMode::Exact,
            SimilarityInput::Sketch(_) => SimilarityMode::Sketch,
        }
    }
}

/// Sparse upper-triangular similarity matrix over document pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    scores: BTreeMap<(DocumentId, DocumentId), f64>,
}

impl SimilarityMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `score` for the pair `{a, b}`.
    ///
    /// Diagonal pairs are never stored; inserting one is a no-op that returns
    /// `None`. Otherwise returns the previous score for the pair, if any.
    pub fn insert(&mut self, a: DocumentId, b: DocumentId, score: f64) -> Option<f64> {
        let key = match a.cmp(&b) {
            std::cmp::Ordering::Less => (a, b),
            std::cmp::Ordering::Greater => (b, a),
            std::cmp::Ordering::Equal => return None,
        };
        self.scores.insert(key, score)
    }

    /// Score for the pair `{a, b}` in either argument order.
    pub fn get(&self, a: &DocumentId, b: &DocumentId) -> Option<f64> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if lo == hi {
            return None;
        }
        self.scores.get(&(lo.clone(), hi.clone())).copied()
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Stored entries as `(smaller, larger, score)`, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&DocumentId, &DocumentId, f64)> {
        self.scores.iter().map(|((a, b), &score)| (a, b, score))
    }
}

/// Build a similarity matrix over every unordered pair of distinct documents.
pub fn build_matrix(input: SimilarityInput<'_>, use_parallel: bool) -> SimilarityMatrix {
    let matrix = match input {
        SimilarityInput::Exact(dataset) => {
            let rows: Vec<_> = dataset.iter().collect();
            pairwise(&rows, use_parallel, |a, b| exact_jaccard(a, b))
        }
        SimilarityInput::Sketch(signatures) => {
            let rows: Vec<_> = signatures
                .iter()
                .map(|(id, sig)| (id, index_set(sig)))
                .collect();
            pairwise(&rows, use_parallel, |a, b| sorted_set_jaccard(a, b))
        }
    };
    debug!(
        mode = ?input.mode(),
        pairs = matrix.len(),
        use_parallel,
        "similarity_matrix_built"
    );
    matrix
}

/// Exact (baseline) matrix from full feature vectors.
pub fn build_exact(dataset: &Dataset, use_parallel: bool) -> SimilarityMatrix {
    build_matrix(SimilarityInput::Exact(dataset), use_parallel)
}

/// Estimated matrix from min-wise signatures.
pub fn build_sketch(signatures: &Signatures, use_parallel: bool) -> SimilarityMatrix {
    build_matrix(SimilarityInput::Sketch(signatures), use_parallel)
}

/// Score every pair `(rows[i], rows[j])`, `i < j`.
///
/// `rows` must already be sorted by id, which holds for anything iterated out
/// of a `Dataset` or `Signatures`; each key is then `(smaller, larger)`.
fn pairwise<T, F>(rows: &[(&DocumentId, T)], use_parallel: bool, score: F) -> SimilarityMatrix
where
    T: Sync,
    F: Fn(&T, &T) -> f64 + Sync,
{
    let score = &score;
    let row_scores = |i: usize| {
        let (left_id, left) = &rows[i];
        rows[i + 1..].iter().map(move |(right_id, right)| {
            (((*left_id).clone(), (*right_id).clone()), score(left, right))
        })
    };

    let scores: BTreeMap<(DocumentId, DocumentId), f64> = if use_parallel {
        (0..rows.len())
            .into_par_iter()
            .flat_map_iter(row_scores)
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    } else {
        (0..rows.len()).flat_map(row_scores).collect()
    };
    SimilarityMatrix { scores }
}
