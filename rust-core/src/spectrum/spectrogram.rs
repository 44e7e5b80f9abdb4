//! Time-frequency power maps in dB
//!
//! Each frame is transformed on its own. Bin power is normalized by the
//! length of the whole input sequence (not the frame length) and expressed
//! in dB per radian/sample.

use super::fft::{bin_frequencies, SpectralTransform};
use super::psd::validate_sample_rate;
use super::windowing::frames;
use crate::error::{IqError, Result};
use log::debug;
use ndarray::Array2;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Value reported for bins with no power at all
pub const DB_FLOOR: f64 = -120.0;

/// Spectrogram configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrogramConfig {
    /// Samples per frame, also the number of frequency bins
    pub window_size: usize,

    /// Samples shared by consecutive frames
    pub overlap: usize,

    /// Sample rate in Hz
    pub sample_rate: f64,
}

impl Default for SpectrogramConfig {
    fn default() -> Self {
        Self {
            window_size: 1024,
            overlap: 512,
            sample_rate: 1.0,
        }
    }
}

impl SpectrogramConfig {
    pub fn new(window_size: usize, overlap: usize, sample_rate: f64) -> Self {
        Self {
            window_size,
            overlap,
            sample_rate,
        }
    }

    /// Check the parameters that do not depend on the input length
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(IqError::InvalidConfiguration(
                "window_size must be greater than zero".to_string(),
            ));
        }
        if self.overlap >= self.window_size {
            return Err(IqError::InvalidConfiguration(format!(
                "overlap {} must be smaller than window_size {}",
                self.overlap, self.window_size
            )));
        }
        validate_sample_rate(self.sample_rate)
    }

    /// Offset between consecutive frame starts
    pub fn hop_size(&self) -> usize {
        self.window_size.saturating_sub(self.overlap)
    }
}

/// Convert a linear bin power to dB per radian/sample
///
/// `10·log10(power) − 10·log10(2π / sample_rate)`, or [`DB_FLOOR`] when
/// `power <= 0`.
pub fn power_to_db(power: f64, sample_rate: f64) -> f64 {
    if power <= 0.0 {
        DB_FLOOR
    } else {
        10.0 * power.log10() - 10.0 * (2.0 * PI / sample_rate).log10()
    }
}

/// Power matrix indexed by (frame, frequency bin)
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    /// dB rows in frame order
    rows: Vec<Vec<f64>>,

    /// Start offset of each frame in the source sequence
    frame_starts: Vec<usize>,

    window_size: usize,
    hop: usize,
    sample_rate: f64,
}

impl Spectrogram {
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }

    pub fn num_frames(&self) -> usize {
        self.rows.len()
    }

    /// Number of frequency bins per row
    pub fn num_bins(&self) -> usize {
        self.window_size
    }

    pub fn hop_size(&self) -> usize {
        self.hop
    }

    pub fn frame_starts(&self) -> &[usize] {
        &self.frame_starts
    }

    /// Start time of each frame in seconds
    pub fn frame_times(&self) -> Vec<f64> {
        self.frame_starts
            .iter()
            .map(|&start| start as f64 / self.sample_rate)
            .collect()
    }

    /// Frequency of each column in Hz, unshifted bin order
    pub fn frequencies(&self) -> Vec<f64> {
        bin_frequencies(self.window_size, self.sample_rate)
    }

    /// Copy into a `(frames, bins)` matrix
    pub fn to_array(&self) -> Array2<f64> {
        let mut array = Array2::zeros((self.rows.len(), self.window_size));
        for (mut dst, src) in array.rows_mut().into_iter().zip(self.rows.iter()) {
            for (d, &s) in dst.iter_mut().zip(src.iter()) {
                *d = s;
            }
        }
        array
    }
}

/// Compute the dB spectrogram of `samples`
///
/// # Arguments
/// * `transform` - Forward FFT used for every frame
/// * `samples` - Whole input sequence
/// * `config` - Frame geometry and sample rate
pub fn spectrogram<T: SpectralTransform + ?Sized>(
    transform: &mut T,
    samples: &[Complex64],
    config: &SpectrogramConfig,
) -> Result<Spectrogram> {
    config.validate()?;

    let frames = frames(samples, config.window_size, config.overlap)?;
    let layout = *frames.layout();
    debug!(
        "Spectrogram: {} samples, {} frames of {} (hop {})",
        samples.len(),
        layout.num_frames,
        layout.window_size,
        layout.hop
    );

    let total_len = samples.len() as f64;
    let mut rows = Vec::with_capacity(layout.num_frames);
    let mut frame_starts = Vec::with_capacity(layout.num_frames);

    for frame in &frames {
        let spectrum = transform.forward(frame.samples)?;
        let row = spectrum
            .iter()
            .map(|bin| {
                let magnitude = bin.norm();
                power_to_db(magnitude * magnitude / total_len, config.sample_rate)
            })
            .collect();

        rows.push(row);
        frame_starts.push(frame.start);
    }

    Ok(Spectrogram {
        rows,
        frame_starts,
        window_size: layout.window_size,
        hop: layout.hop,
        sample_rate: config.sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::fft::FftEngine;
    use crate::spectrum::psd::power_spectral_density;

    fn cycle() -> Vec<Complex64> {
        vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(-1.0, 0.0),
            Complex64::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_single_cycle() {
        let mut engine = FftEngine::new();
        let sample_rate = 1.0;
        let spec = spectrogram(&mut engine, &cycle(), &SpectrogramConfig::new(4, 0, sample_rate)).unwrap();

        assert_eq!(spec.num_frames(), 1);
        assert_eq!(spec.rows()[0].len(), 4);

        // |X[1]| = |X[3]| = 2, power = 4 / 4
        let expected = -10.0 * (2.0 * PI / sample_rate).log10();
        let row = &spec.rows()[0];
        assert!((row[1] - expected).abs() < 1e-9);
        assert!((row[3] - expected).abs() < 1e-9);

        assert!(row[0] <= DB_FLOOR + 1e-6);
        assert!(row[1] > row[0] + 100.0);
    }

    #[test]
    fn test_zero_input_pinned_to_floor() {
        let mut engine = FftEngine::new();
        let zeros = vec![Complex64::new(0.0, 0.0); 32];
        let spec = spectrogram(&mut engine, &zeros, &SpectrogramConfig::new(8, 4, 1000.0)).unwrap();

        assert_eq!(spec.num_frames(), 7);
        assert!(spec.rows().iter().flatten().all(|&db| db == DB_FLOOR));
    }

    #[test]
    fn test_normalized_by_sequence_length() {
        let mut engine = FftEngine::new();
        let samples = vec![Complex64::new(1.0, 0.0); 16];
        let sample_rate = 2.0 * PI;

        let spec = spectrogram(&mut engine, &samples, &SpectrogramConfig::new(4, 0, sample_rate)).unwrap();

        // DC bin of a 4-sample frame is 4; divided by all 16 samples -> power 1 -> 0 dB
        assert_eq!(spec.num_frames(), 4);
        for row in spec.rows() {
            assert!(row[0].abs() < 1e-9);
        }
    }

    #[test]
    fn test_full_window_matches_psd_with_different_divisors() {
        let mut engine = FftEngine::new();
        let samples: Vec<Complex64> = (0..16)
            .map(|i| Complex64::new((i as f64 * 0.9).cos(), (i as f64 * 0.4).sin()))
            .collect();
        let n = samples.len() as f64;
        let sample_rate = 48_000.0;

        let psd = power_spectral_density(&mut engine, &samples, sample_rate).unwrap();
        let spec = spectrogram(&mut engine, &samples, &SpectrogramConfig::new(16, 0, sample_rate)).unwrap();
        let raw = engine.forward(&samples).unwrap();

        assert_eq!(spec.num_frames(), 1);
        for (k, &db) in spec.rows()[0].iter().enumerate() {
            let power = raw[k].norm_sqr();
            // Whole-sequence PSD divides by N · fs
            assert!((psd[k] - power / (n * sample_rate)).abs() < 1e-12);
            // Spectrogram divides by N, then rescales to dB per rad/sample
            let spectrogram_linear = 10f64.powf((db + 10.0 * (2.0 * PI / sample_rate).log10()) / 10.0);
            assert!((spectrogram_linear - power / n).abs() < 1e-9 * (1.0 + power));
            assert!((spectrogram_linear - psd[k] * sample_rate).abs() < 1e-9 * (1.0 + power));
        }
    }

    #[test]
    fn test_axes() {
        let mut engine = FftEngine::new();
        let samples = vec![Complex64::new(1.0, 1.0); 40];
        let spec = spectrogram(&mut engine, &samples, &SpectrogramConfig::new(8, 2, 100.0)).unwrap();

        assert_eq!(spec.frame_starts(), &[0, 6, 12, 18, 24, 30]);
        assert_eq!(spec.frame_times()[1], 0.06);
        assert_eq!(spec.frequencies()[1], 12.5);
        assert_eq!(spec.to_array().dim(), (6, 8));
    }

    #[test]
    fn test_invalid_config() {
        let mut engine = FftEngine::new();
        let samples = cycle();

        for config in [
            SpectrogramConfig::new(0, 0, 1.0),
            SpectrogramConfig::new(4, 4, 1.0),
            SpectrogramConfig::new(8, 0, 1.0),
            SpectrogramConfig::new(4, 0, 0.0),
        ] {
            assert!(matches!(
                spectrogram(&mut engine, &samples, &config),
                Err(IqError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_power_to_db_floor_only_for_nonpositive() {
        assert_eq!(power_to_db(0.0, 1.0), DB_FLOOR);
        assert_eq!(power_to_db(-1.0, 1.0), DB_FLOOR);
        // Positive power below the floor is reported as-is
        assert!(power_to_db(1e-30, 2.0 * PI) < DB_FLOOR);
    }
}
