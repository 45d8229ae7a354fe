//! Random permutations over feature indices and the pool that accumulates them.
//!
//! A pool only ever grows. Drawing more permutations for a larger sketch size
//! keeps every permutation drawn earlier, in order, so signatures at `k = 32`
//! extend the ones at `k = 16`.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use xxhash_rust::xxh3::xxh3_64;

use crate::config::{SketchConfig, SketchError};

/// A bijection on `0..L`, read as a scan order over feature indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// The identity order `0, 1, .., dimension - 1`.
    pub fn identity(dimension: usize) -> Self {
        Self((0..dimension).collect())
    }

    /// Uniformly random permutation of `0..dimension` (Fisher-Yates).
    pub fn random<R: Rng + ?Sized>(dimension: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..dimension).collect();
        order.shuffle(rng);
        Self(order)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    /// `true` when every index of `0..len` appears exactly once.
    pub fn is_bijection(&self) -> bool {
        let mut seen = vec![false; self.0.len()];
        for &idx in &self.0 {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// Hash of the canonical little-endian serialization, used as the key of
    /// the pool's duplicate index.
    fn digest(&self) -> u64 {
        let mut bytes = Vec::with_capacity(self.0.len() * 8);
        for &idx in &self.0 {
            bytes.extend_from_slice(&(idx as u64).to_le_bytes());
        }
        xxh3_64(&bytes)
    }
}

/// Append-only, duplicate-free sequence of permutations over one dimension.
#[derive(Debug, Clone)]
pub struct PermutationPool {
    dimension: usize,
    permutations: Vec<Permutation>,
    // digest -> positions in `permutations`; collisions are resolved by
    // comparing the full permutation.
    index: HashMap<u64, Vec<usize>>,
    rng: ChaCha8Rng,
}

impl PermutationPool {
    /// Empty pool over `dimension` features driven by `rng`.
    pub fn with_rng(dimension: usize, rng: ChaCha8Rng) -> Self {
        Self {
            dimension,
            permutations: Vec::new(),
            index: HashMap::new(),
            rng,
        }
    }

    /// Empty pool seeded from `seed`.
    pub fn seeded(dimension: usize, seed: u64) -> Self {
        Self::with_rng(dimension, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Empty pool for the `stream`-th dataset of a run.
    ///
    /// With a configured seed each stream gets its own derived seed, so
    /// datasets never share permutation draws. Without one the RNG is seeded
    /// from OS entropy.
    pub fn from_config(dimension: usize, cfg: &SketchConfig, stream: u64) -> Self {
        let rng = match cfg.seed {
            Some(seed) => {
                let step = stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
                ChaCha8Rng::seed_from_u64(splitmix64(seed.wrapping_add(step)))
            }
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(dimension, rng)
    }

    /// Grow the pool until it holds at least `k` permutations.
    ///
    /// New permutations are drawn uniformly at random; a draw equal to one
    /// already in the pool is discarded and redrawn. Returns how many
    /// permutations were appended (zero when the pool was already big enough).
    pub fn ensure(&mut self, k: usize) -> Result<usize, SketchError> {
        if self.dimension == 0 {
            return Err(SketchError::InvalidInput {
                reason: "feature vectors have zero length",
            });
        }
        if k <= self.permutations.len() {
            return Ok(0);
        }
        if let Some(total) = factorial(self.dimension) {
            if k > total {
                return Err(SketchError::InsufficientPermutations {
                    dimension: self.dimension,
                    requested: k,
                });
            }
        }

        let before = self.permutations.len();
        let mut rejected = 0usize;
        while self.permutations.len() < k {
            let candidate = Permutation::random(self.dimension, &mut self.rng);
            if !self.try_push(candidate) {
                rejected += 1;
            }
        }

        let added = self.permutations.len() - before;
        debug!(
            dimension = self.dimension,
            target = k,
            added,
            rejected,
            "permutation_pool_grown"
        );
        Ok(added)
    }

    /// Append `candidate` unless an equal permutation is already pooled.
    fn try_push(&mut self, candidate: Permutation) -> bool {
        let digest = candidate.digest();
        let slots = self.index.entry(digest).or_default();
        if slots
            .iter()
            .any(|&pos| self.permutations[pos] == candidate)
        {
            return false;
        }
        slots.push(self.permutations.len());
        self.permutations.push(candidate);
        true
    }

    /// Number of features each permutation orders.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.permutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permutations.is_empty()
    }

    pub fn permutations(&self) -> &[Permutation] {
        &self.permutations
    }

    pub fn contains(&self, permutation: &Permutation) -> bool {
        self.index
            .get(&permutation.digest())
            .is_some_and(|slots| slots.iter().any(|&pos| &self.permutations[pos] == permutation))
    }
}

/// `n!`, or `None` once it no longer fits in a `usize`.
fn factorial(n: usize) -> Option<usize> {
    (1..=n).try_fold(1usize, |acc, x| acc.checked_mul(x))
}

#[inline]
pub(crate) fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
