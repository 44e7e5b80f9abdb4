//! Materialized IQ sample sequences and range accessors

pub mod accessors;

pub use accessors::{imaginary_part, iq_pairs, real_part, resolve_range, resolve_signed_range};

use ndarray::Array2;
use num_complex::Complex64;
use std::ops::Deref;
use std::sync::Arc;

/// Immutable, time-ordered sequence of complex IQ samples
///
/// Index 0 is the earliest sample. The length is fixed at construction and
/// clones share the same backing storage.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSequence {
    samples: Arc<[Complex64]>,
}

impl SampleSequence {
    /// Wrap already-decoded complex samples
    pub fn new(samples: Vec<Complex64>) -> Self {
        Self {
            samples: samples.into(),
        }
    }

    /// Build from `[real, imaginary]` pairs
    pub fn from_pairs(pairs: &[[f64; 2]]) -> Self {
        pairs
            .iter()
            .map(|&[re, im]| Complex64::new(re, im))
            .collect()
    }

    pub fn as_slice(&self) -> &[Complex64] {
        &self.samples
    }

    /// Samples as `[real, imaginary]` pairs
    pub fn to_pairs(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(|c| [c.re, c.im]).collect()
    }

    /// Samples as an `(N, 2)` matrix, column 0 real and column 1 imaginary
    pub fn to_pairs_array(&self) -> Array2<f64> {
        let mut array = Array2::zeros((self.samples.len(), 2));
        for (mut row, c) in array.rows_mut().into_iter().zip(self.samples.iter()) {
            row[0] = c.re;
            row[1] = c.im;
        }
        array
    }
}

impl Deref for SampleSequence {
    type Target = [Complex64];

    fn deref(&self) -> &[Complex64] {
        &self.samples
    }
}

impl AsRef<[Complex64]> for SampleSequence {
    fn as_ref(&self) -> &[Complex64] {
        &self.samples
    }
}

impl From<Vec<Complex64>> for SampleSequence {
    fn from(samples: Vec<Complex64>) -> Self {
        Self::new(samples)
    }
}

impl FromIterator<Complex64> for SampleSequence {
    fn from_iter<I: IntoIterator<Item = Complex64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_preserves_order() {
        let seq = SampleSequence::from_pairs(&[[1.0, 2.0], [3.0, 4.0]]);

        assert_eq!(seq.len(), 2);
        assert_eq!(seq[0], Complex64::new(1.0, 2.0));
        assert_eq!(seq[1], Complex64::new(3.0, 4.0));
        assert_eq!(seq.to_pairs(), vec![[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_clones_share_storage() {
        let seq = SampleSequence::from_pairs(&[[0.5, -0.5]; 16]);
        let shared = seq.clone();

        assert!(std::ptr::eq(seq.as_slice(), shared.as_slice()));
    }

    #[test]
    fn test_pairs_array_shape() {
        let seq = SampleSequence::from_pairs(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let array = seq.to_pairs_array();

        assert_eq!(array.dim(), (3, 2));
        assert_eq!(array[[2, 0]], 5.0);
        assert_eq!(array[[2, 1]], 6.0);
    }
}
