use crate::TermId;
use std::cmp::Ordering;

/// Sparse term-weight vector, sorted by term id.
///
/// Vectors produced by [`SparseVector::normalized`] have unit length or no
/// entries at all, so cosine similarity between two of them is a plain dot
/// product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    /// Build a unit-length vector from raw weights. Zero weights are dropped;
    /// if nothing is left the vector is empty (zero magnitude).
    pub fn normalized(mut entries: Vec<(TermId, f32)>) -> Self {
        entries.retain(|(_, w)| *w > 0.0);
        entries.sort_by_key(|(tid, _)| *tid);
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm == 0.0 {
            return Self::default();
        }
        for (_, w) in entries.iter_mut() {
            *w /= norm;
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[(TermId, f32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity in [0, 1]; 0 when either side has zero magnitude.
    pub fn cosine(&self, other: &SparseVector) -> f32 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }
        self.dot(other).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_unit_length() {
        let v = SparseVector::normalized(vec![(3, 3.0), (1, 4.0)]);
        assert_eq!(v.entries()[0].0, 1);
        let len: f32 = v.entries().iter().map(|(_, w)| w * w).sum();
        assert!((len - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_weights_give_zero_vector() {
        let v = SparseVector::normalized(vec![(0, 0.0), (1, 0.0)]);
        assert!(v.is_zero());
        let other = SparseVector::normalized(vec![(0, 1.0)]);
        assert_eq!(v.cosine(&other), 0.0);
        assert_eq!(other.cosine(&v), 0.0);
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = SparseVector::normalized(vec![(0, 0.3), (2, 0.9), (7, 1.7)]);
        assert!((v.cosine(&v) - 1.0).abs() < 1e-6);
        assert!(v.cosine(&v) <= 1.0);
    }

    #[test]
    fn disjoint_vectors_are_orthogonal() {
        let a = SparseVector::normalized(vec![(0, 1.0), (2, 1.0)]);
        let b = SparseVector::normalized(vec![(1, 1.0), (3, 1.0)]);
        assert_eq!(a.cosine(&b), 0.0);
    }
}
