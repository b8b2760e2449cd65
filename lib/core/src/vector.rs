use serde::{Deserialize, Serialize};

/// A dense feature row: one-hot category blocks followed by continuous columns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    data: Vec<f32>,
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self { data: vec![0.0; dim] }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    pub fn dot(&self, other: &FeatureVector) -> f32 {
        dot_product(&self.data, &other.data)
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        dot_product(&self.data, &self.data).sqrt()
    }

    /// True when every component is zero (or the vector has no components)
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| *x == 0.0)
    }

    /// Cosine similarity with another vector.
    ///
    /// Returns 0.0 when either side has zero magnitude or the dimensions differ;
    /// callers that care about dimension agreement check it before scoring.
    #[inline]
    pub fn cosine_similarity(&self, other: &FeatureVector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        let sim = self.dot(other) / (norm_a * norm_b);
        if sim.is_finite() {
            // Rounding can push identical directions a hair past 1.0
            sim.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

/// Dot product with two accumulators for better pipelining
#[inline]
fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().min(b.len());
    let mut sum1 = 0.0f32;
    let mut sum2 = 0.0f32;

    let mut i = 0;
    while i + 1 < len {
        sum1 += a[i] * b[i];
        sum2 += a[i + 1] * b[i + 1];
        i += 2;
    }
    if i < len {
        sum1 += a[i] * b[i];
    }

    sum1 + sum2
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_dot_product_odd_length() {
        let a = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        let b = FeatureVector::new(vec![4.0, 5.0, 6.0]);
        assert_eq!(a.dot(&b), 32.0);
    }

    #[test]
    fn test_self_similarity_is_one() {
        let v = FeatureVector::new(vec![1.0, 0.0, 1.0, 450.0]);
        assert!((v.cosine_similarity(&v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_similarity_is_zero() {
        let v = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        let zero = FeatureVector::zeros(3);
        let sim = v.cosine_similarity(&zero);
        assert_eq!(sim, 0.0);
        assert!(!sim.is_nan());
        assert_eq!(zero.cosine_similarity(&zero), 0.0);
    }

    #[test]
    fn test_opposite_vectors() {
        let a = FeatureVector::new(vec![1.0, -2.0]);
        let b = FeatureVector::new(vec![-1.0, 2.0]);
        assert!((a.cosine_similarity(&b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dimension_mismatch_scores_zero() {
        let a = FeatureVector::new(vec![1.0, 0.0]);
        let b = FeatureVector::new(vec![1.0, 0.0, 0.0]);
        assert_eq!(a.cosine_similarity(&b), 0.0);
    }

    #[test]
    fn test_random_pairs_stay_in_bounds() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let a: Vec<f32> = (0..12).map(|_| rng.random_range(-1000.0f32..1000.0)).collect();
            let b: Vec<f32> = (0..12).map(|_| rng.random_range(-1000.0f32..1000.0)).collect();
            let sim = FeatureVector::new(a).cosine_similarity(&FeatureVector::new(b));
            assert!((-1.0..=1.0).contains(&sim), "similarity out of range: {}", sim);
        }
    }
}
