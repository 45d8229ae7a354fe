//! Jaccard kernels for boolean vectors and min-wise signatures.
//!
//! Both kernels return `0.0` when the union is empty. That covers two all-zero
//! vectors and two empty (fully truncated) signatures alike.

use corpus::FeatureVector;
use sketch::Signature;

/// Exact Jaccard similarity of two boolean vectors, treating each as the set of
/// its set positions.
///
/// Positions past the end of the shorter vector count as unset.
pub fn exact_jaccard(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let len = a.len().max(b.len());
    let mut union = 0usize;
    let mut inter = 0usize;
    for idx in 0..len {
        let (x, y) = (a.get(idx), b.get(idx));
        union += usize::from(x | y);
        inter += usize::from(x & y);
    }
    ratio(inter, union)
}

/// Jaccard similarity of two signatures read as sets of feature indices.
/// Repeated indices within one signature collapse.
pub fn sketch_jaccard(a: &Signature, b: &Signature) -> f64 {
    let left = index_set(a);
    let right = index_set(b);
    sorted_set_jaccard(&left, &right)
}

/// Sorted, deduplicated copy of a signature's elements.
pub(crate) fn index_set(signature: &Signature) -> Vec<usize> {
    let mut set = signature.as_slice().to_vec();
    set.sort_unstable();
    set.dedup();
    set
}

/// Jaccard similarity of two sorted, duplicate-free index lists.
pub(crate) fn sorted_set_jaccard(left: &[usize], right: &[usize]) -> f64 {
    let mut inter = 0usize;
    let (mut i, mut j) = (0usize, 0usize);
    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                inter += 1;
                i += 1;
                j += 1;
            }
        }
    }
    let union = left.len() + right.len() - inter;
    ratio(inter, union)
}

#[inline]
fn ratio(inter: usize, union: usize) -> f64 {
    if union == 0 {
        0.0
    } else {
        inter as f64 / union as f64
    }
}
