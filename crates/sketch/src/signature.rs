//! Min-wise signatures over boolean feature vectors.
//!
//! For each permutation in the pool, a document contributes the first index,
//! in permutation order, whose feature is set. Two documents agree on that
//! index with probability equal to their Jaccard similarity.

use std::collections::btree_map::{self, BTreeMap};

use corpus::{Dataset, DocumentId, FeatureVector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{EmptyVectorPolicy, SketchConfig, SketchError};
use crate::permutation::{Permutation, PermutationPool};

/// Per-document sequence of min-wise feature indices, one per permutation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature {
    elements: Vec<usize>,
}

impl Signature {
    pub fn new(elements: Vec<usize>) -> Self {
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.elements
    }
}

impl From<Vec<usize>> for Signature {
    fn from(elements: Vec<usize>) -> Self {
        Self::new(elements)
    }
}

/// Signatures for every document of a dataset, in `DocumentId` order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signatures {
    by_document: BTreeMap<DocumentId, Signature>,
    permutations: usize,
}

impl Signatures {
    pub fn new(by_document: BTreeMap<DocumentId, Signature>, permutations: usize) -> Self {
        Self {
            by_document,
            permutations,
        }
    }

    /// Pool size the signatures were generated from.
    pub fn permutations(&self) -> usize {
        self.permutations
    }

    pub fn len(&self) -> usize {
        self.by_document.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_document.is_empty()
    }

    pub fn get(&self, id: &DocumentId) -> Option<&Signature> {
        self.by_document.get(id)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, DocumentId, Signature> {
        self.by_document.iter()
    }
}

impl<'a> IntoIterator for &'a Signatures {
    type Item = (&'a DocumentId, &'a Signature);
    type IntoIter = btree_map::Iter<'a, DocumentId, Signature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Generate one signature per document over the entire current pool.
///
/// Runs across documents with rayon when `cfg.use_parallel` is set; the output
/// is identical either way.
pub fn generate_signatures(
    dataset: &Dataset,
    pool: &PermutationPool,
    cfg: &SketchConfig,
) -> Result<Signatures, SketchError> {
    if !dataset.is_empty() && dataset.dimension() != pool.dimension() {
        return Err(SketchError::DimensionMismatch {
            pool: pool.dimension(),
            dataset: dataset.dimension(),
        });
    }

    let permutations = pool.permutations();
    let policy = cfg.empty_vector_policy;

    let by_document: BTreeMap<DocumentId, Signature> = if cfg.use_parallel {
        let documents: Vec<(&DocumentId, &FeatureVector)> = dataset.iter().collect();
        documents
            .into_par_iter()
            .map(|(id, vector)| {
                document_signature(id, vector, permutations, policy).map(|sig| (id.clone(), sig))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .collect()
    } else {
        dataset
            .iter()
            .map(|(id, vector)| {
                document_signature(id, vector, permutations, policy).map(|sig| (id.clone(), sig))
            })
            .collect::<Result<_, _>>()?
    };

    Ok(Signatures::new(by_document, permutations.len()))
}

fn document_signature(
    id: &DocumentId,
    vector: &FeatureVector,
    permutations: &[Permutation],
    policy: EmptyVectorPolicy,
) -> Result<Signature, SketchError> {
    if policy == EmptyVectorPolicy::Reject && vector.is_all_zero() {
        return Err(SketchError::EmptyFeatureVector {
            doc_id: id.to_string(),
        });
    }
    let elements = permutations
        .iter()
        .filter_map(|perm| min_wise_index(vector, perm))
        .collect();
    Ok(Signature::new(elements))
}

/// First index in `permutation` order whose feature is set.
#[inline]
pub(crate) fn min_wise_index(vector: &FeatureVector, permutation: &Permutation) -> Option<usize> {
    permutation.iter().copied().find(|&idx| vector.get(idx))
}
