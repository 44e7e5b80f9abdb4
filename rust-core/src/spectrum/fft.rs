//! Forward complex FFT behind a pluggable transform trait
//!
//! Output bins follow the native unshifted ordering: DC first, then positive
//! frequencies, then negative frequencies. No scaling is applied.

use crate::error::{IqError, Result};
use log::trace;
use num_complex::Complex64;
use rustfft::FftPlanner;

/// Forward discrete Fourier transform of an arbitrary-length complex input
///
/// Implementations must return exactly `input.len()` unnormalized bins and
/// fail with `EmptyInput` on a zero-length input. Plan caches make this
/// `&mut self`; use one transform per thread.
pub trait SpectralTransform {
    fn forward(&mut self, input: &[Complex64]) -> Result<Vec<Complex64>>;
}

/// `rustfft`-backed transform with a plan cache and reusable scratch space
pub struct FftEngine {
    /// Caches one plan per transform length
    planner: FftPlanner<f64>,

    /// Scratch buffer, grown to the largest plan seen
    scratch: Vec<Complex64>,
}

impl FftEngine {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            scratch: Vec::new(),
        }
    }
}

impl Default for FftEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralTransform for FftEngine {
    fn forward(&mut self, input: &[Complex64]) -> Result<Vec<Complex64>> {
        if input.is_empty() {
            return Err(IqError::EmptyInput);
        }

        let fft = self.planner.plan_fft_forward(input.len());
        let scratch_len = fft.get_inplace_scratch_len();
        if self.scratch.len() < scratch_len {
            trace!("Growing FFT scratch to {} for length {}", scratch_len, input.len());
            self.scratch.resize(scratch_len, Complex64::new(0.0, 0.0));
        }

        let mut buffer = input.to_vec();
        fft.process_with_scratch(&mut buffer, &mut self.scratch[..scratch_len]);
        Ok(buffer)
    }
}

/// Frequency of every bin of an `n`-point transform in Hz
///
/// Bin k maps to `k/n · fs` while `2k < n`, otherwise to `(k - n)/n · fs`.
pub fn bin_frequencies(n: usize, sample_rate: f64) -> Vec<f64> {
    (0..n)
        .map(|k| {
            let k_signed = if 2 * k < n { k as f64 } else { k as f64 - n as f64 };
            k_signed * sample_rate / n as f64
        })
        .collect()
}
