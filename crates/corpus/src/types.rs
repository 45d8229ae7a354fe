//! Core data types for the corpus crate.
//!
//! Feature vectors arrive here already extracted: one fixed-length boolean
//! vector per document, keyed by a totally ordered [`DocumentId`]. Nothing in
//! this module tokenizes or weights text.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CorpusError;

/// Opaque document key, unique within one [`Dataset`].
///
/// Ordering is plain string ordering. Pairwise computations store every pair
/// under `(smaller, larger)` according to this order, so it must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Fixed-length boolean feature vector for a single document.
///
/// Serializes as a JSON array of booleans. Deserialization also accepts the
/// `0`/`1` integer form emitted by most preprocessing pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FeatureVector {
    bits: Vec<bool>,
}

impl FeatureVector {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Build a vector of length `len` with the given positions set.
    ///
    /// Indices outside `0..len` are ignored.
    pub fn from_indices(len: usize, set: &[usize]) -> Self {
        let mut bits = vec![false; len];
        for &idx in set {
            if let Some(bit) = bits.get_mut(idx) {
                *bit = true;
            }
        }
        Self { bits }
    }

    /// Vocabulary size `L`.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Feature value at `index`; out-of-range indices read as `false`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Number of set features.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// `true` when no feature is set (including the zero-length vector).
    pub fn is_all_zero(&self) -> bool {
        !self.bits.iter().any(|&bit| bit)
    }
}

impl From<Vec<bool>> for FeatureVector {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

impl FromIterator<bool> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBit {
    Flag(bool),
    Int(u64),
}

impl<'de> Deserialize<'de> for FeatureVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<RawBit>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|bit| match bit {
                RawBit::Flag(flag) => Ok(flag),
                RawBit::Int(0) => Ok(false),
                RawBit::Int(1) => Ok(true),
                RawBit::Int(other) => Err(D::Error::custom(format!(
                    "feature value must be 0 or 1 (got {other})"
                ))),
            })
            .collect::<Result<Vec<bool>, D::Error>>()
            .map(FeatureVector::new)
    }
}

/// Mapping from [`DocumentId`] to [`FeatureVector`] with a shared dimension.
///
/// Iteration always follows the `DocumentId` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    vectors: BTreeMap<DocumentId, FeatureVector>,
    dimension: usize,
}

impl Dataset {
    /// Create an empty dataset. Its dimension is fixed by the first insert.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from `(id, vector)` pairs, validating that every vector
    /// has the same length and that ids are unique.
    pub fn from_documents<I, K>(documents: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator<Item = (K, FeatureVector)>,
        K: Into<DocumentId>,
    {
        let mut dataset = Self::new();
        for (id, vector) in documents {
            dataset.insert(id.into(), vector)?;
        }
        Ok(dataset)
    }

    /// Insert a document.
    pub fn insert(&mut self, id: DocumentId, vector: FeatureVector) -> Result<(), CorpusError> {
        if self.vectors.is_empty() {
            self.dimension = vector.len();
        } else if vector.len() != self.dimension {
            return Err(CorpusError::DimensionMismatch {
                doc_id: id.to_string(),
                expected: self.dimension,
                found: vector.len(),
            });
        }
        if self.vectors.contains_key(&id) {
            return Err(CorpusError::DuplicateDocument(id.to_string()));
        }
        self.vectors.insert(id, vector);
        Ok(())
    }

    /// Vocabulary size `L` shared by every vector; `0` for an empty dataset.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get(&self, id: &DocumentId) -> Option<&FeatureVector> {
        self.vectors.get(id)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, DocumentId, FeatureVector> {
        self.vectors.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &DocumentId> {
        self.vectors.keys()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = (&'a DocumentId, &'a FeatureVector);
    type IntoIter = btree_map::Iter<'a, DocumentId, FeatureVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A dataset paired with the human-readable label used in reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledDataset {
    pub label: String,
    pub dataset: Dataset,
}

impl LabeledDataset {
    pub fn new(label: impl Into<String>, dataset: Dataset) -> Self {
        Self {
            label: label.into(),
            dataset,
        }
    }
}
