//! High-level IQ analyzer
//!
//! Combines the sample readers with the FFT, PSD and spectrogram estimators.
//! Every operation accepts either an already-materialized sequence or a file
//! plus its descriptor.

use super::fft::{FftEngine, SpectralTransform};
use super::psd;
use super::spectrogram::{self, Spectrogram, SpectrogramConfig};
use crate::error::Result;
use crate::io::{self, SourceDescriptor};
use crate::samples::{self, SampleSequence};
use num_complex::Complex64;
use std::ops::Range;
use std::path::Path;

/// IQ analyzer over a pluggable forward transform
pub struct IqAnalyzer<T: SpectralTransform = FftEngine> {
    transform: T,
}

impl IqAnalyzer<FftEngine> {
    /// Create an analyzer backed by `rustfft`
    pub fn new() -> Self {
        Self::with_transform(FftEngine::new())
    }
}

impl Default for IqAnalyzer<FftEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SpectralTransform> IqAnalyzer<T> {
    pub fn with_transform(transform: T) -> Self {
        Self { transform }
    }

    pub fn transform_mut(&mut self) -> &mut T {
        &mut self.transform
    }

    /// Read every sample of a file
    pub fn read_iq(&self, path: impl AsRef<Path>, descriptor: &SourceDescriptor) -> Result<SampleSequence> {
        io::read_iq(path, descriptor)
    }

    /// All samples of a file as `[real, imaginary]` pairs
    pub fn get_iq_samples(
        &self,
        path: impl AsRef<Path>,
        descriptor: &SourceDescriptor,
    ) -> Result<Vec<[f64; 2]>> {
        Ok(io::read_iq(path, descriptor)?.to_pairs())
    }

    /// Samples `[start, end)` of a file as pairs; `end` is clamped to the file length
    pub fn get_iq_samples_range(
        &self,
        path: impl AsRef<Path>,
        range: Range<usize>,
        descriptor: &SourceDescriptor,
    ) -> Result<Vec<[f64; 2]>> {
        let sequence = io::read_iq(path, descriptor)?;
        samples::iq_pairs(&sequence, range)
    }

    /// Spectrum of `samples` scaled by `1/N`
    pub fn fft(&mut self, samples: &[Complex64]) -> Result<Vec<Complex64>> {
        psd::fft(&mut self.transform, samples)
    }

    /// Spectrum of a whole file scaled by `1/N`
    pub fn fft_file(
        &mut self,
        path: impl AsRef<Path>,
        descriptor: &SourceDescriptor,
    ) -> Result<Vec<Complex64>> {
        let sequence = io::read_iq(path, descriptor)?;
        self.fft(&sequence)
    }

    /// Spectrum of samples `[start, end)` of a file, scaled by the range length
    pub fn fft_range(
        &mut self,
        path: impl AsRef<Path>,
        range: Range<usize>,
        descriptor: &SourceDescriptor,
    ) -> Result<Vec<Complex64>> {
        let sequence = io::read_iq(path, descriptor)?;
        let range = samples::resolve_range(sequence.len(), range)?;
        self.fft(&sequence[range])
    }

    /// Power spectral density `|X[k]|² / (N · sample_rate)`
    pub fn calculate_psd(&mut self, samples: &[Complex64], sample_rate: f64) -> Result<Vec<f64>> {
        psd::power_spectral_density(&mut self.transform, samples, sample_rate)
    }

    /// Power spectral density of a whole file
    pub fn calculate_psd_file(
        &mut self,
        path: impl AsRef<Path>,
        sample_rate: f64,
        descriptor: &SourceDescriptor,
    ) -> Result<Vec<f64>> {
        psd::validate_sample_rate(sample_rate)?;
        let sequence = io::read_iq(path, descriptor)?;
        self.calculate_psd(&sequence, sample_rate)
    }

    /// `|X[k]|² / N` over samples `[start, end)` of a file (no sample-rate scaling)
    pub fn calculate_psd_range(
        &mut self,
        path: impl AsRef<Path>,
        range: Range<usize>,
        descriptor: &SourceDescriptor,
    ) -> Result<Vec<f64>> {
        let sequence = io::read_iq(path, descriptor)?;
        let range = samples::resolve_range(sequence.len(), range)?;
        psd::periodogram(&mut self.transform, &sequence[range])
    }

    /// dB spectrogram of `samples`
    pub fn generate_spectrogram(
        &mut self,
        samples: &[Complex64],
        config: &SpectrogramConfig,
    ) -> Result<Spectrogram> {
        spectrogram::spectrogram(&mut self.transform, samples, config)
    }

    /// dB spectrogram of a whole file
    pub fn generate_spectrogram_file(
        &mut self,
        path: impl AsRef<Path>,
        config: &SpectrogramConfig,
        descriptor: &SourceDescriptor,
    ) -> Result<Spectrogram> {
        config.validate()?;
        let sequence = io::read_iq(path, descriptor)?;
        self.generate_spectrogram(&sequence, config)
    }

    /// Real components of `samples[start, end)`
    pub fn real_part(&self, samples: &[Complex64], range: Range<usize>) -> Result<Vec<f64>> {
        samples::real_part(samples, range)
    }

    /// Real components of every sample in a file
    pub fn real_part_file(
        &self,
        path: impl AsRef<Path>,
        descriptor: &SourceDescriptor,
    ) -> Result<Vec<f64>> {
        Ok(io::read_iq(path, descriptor)?.iter().map(|c| c.re).collect())
    }

    /// Imaginary components of `samples[start, end)`
    pub fn imaginary_part(&self, samples: &[Complex64], range: Range<usize>) -> Result<Vec<f64>> {
        samples::imaginary_part(samples, range)
    }

    /// Imaginary components of every sample in a file
    pub fn imaginary_part_file(
        &self,
        path: impl AsRef<Path>,
        descriptor: &SourceDescriptor,
    ) -> Result<Vec<f64>> {
        Ok(io::read_iq(path, descriptor)?.iter().map(|c| c.im).collect())
    }
}
