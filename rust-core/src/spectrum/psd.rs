//! Whole-sequence FFT and power spectral density estimates

use super::fft::SpectralTransform;
use crate::error::{IqError, Result};
use num_complex::Complex64;

/// Reject sample rates that would turn a division into `inf` or `NaN`
pub fn validate_sample_rate(sample_rate: f64) -> Result<()> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(IqError::InvalidConfiguration(format!(
            "sample_rate must be a positive finite number, got {}",
            sample_rate
        )));
    }
    Ok(())
}

/// Spectrum of `samples` scaled by `1/N`
///
/// This is the only scaling convention for FFT output handed to callers;
/// the PSD and spectrogram estimators work from the raw transform.
pub fn fft<T: SpectralTransform + ?Sized>(
    transform: &mut T,
    samples: &[Complex64],
) -> Result<Vec<Complex64>> {
    let mut spectrum = transform.forward(samples)?;
    let scale = 1.0 / spectrum.len() as f64;
    for bin in spectrum.iter_mut() {
        *bin *= scale;
    }
    Ok(spectrum)
}

/// Power per bin normalized by the transform length only: `|X[k]|² / N`
pub fn periodogram<T: SpectralTransform + ?Sized>(
    transform: &mut T,
    samples: &[Complex64],
) -> Result<Vec<f64>> {
    let spectrum = transform.forward(samples)?;
    let n = spectrum.len() as f64;
    Ok(spectrum.iter().map(|bin| bin.norm_sqr() / n).collect())
}

/// Power spectral density: `|X[k]|² / (N · sample_rate)`
///
/// # Arguments
/// * `samples` - Entire sequence, transformed without framing
/// * `sample_rate` - Samples per second
pub fn power_spectral_density<T: SpectralTransform + ?Sized>(
    transform: &mut T,
    samples: &[Complex64],
    sample_rate: f64,
) -> Result<Vec<f64>> {
    validate_sample_rate(sample_rate)?;

    let spectrum = transform.forward(samples)?;
    let divisor = spectrum.len() as f64 * sample_rate;
    Ok(spectrum.iter().map(|bin| bin.norm_sqr() / divisor).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::fft::FftEngine;

    fn tone(n: usize, bin: usize, amplitude: f64) -> Vec<Complex64> {
        (0..n)
            .map(|t| {
                Complex64::from_polar(
                    amplitude,
                    2.0 * std::f64::consts::PI * bin as f64 * t as f64 / n as f64,
                )
            })
            .collect()
    }

    #[test]
    fn test_fft_scaled_by_length() {
        let mut engine = FftEngine::new();
        let spectrum = fft(&mut engine, &tone(32, 3, 2.0)).unwrap();

        // Unit-normalized transform recovers the tone amplitude
        assert!((spectrum[3].norm() - 2.0).abs() < 1e-9);
        assert!(spectrum[0].norm() < 1e-9);
    }

    #[test]
    fn test_fft_scaling_is_raw_over_n() {
        let mut engine = FftEngine::new();
        let samples: Vec<Complex64> = (0..20)
            .map(|i| Complex64::new((i as f64).sin(), (i as f64 * 0.3).cos()))
            .collect();

        let raw = engine.forward(&samples).unwrap();
        let scaled = fft(&mut engine, &samples).unwrap();
        for (r, s) in raw.iter().zip(scaled.iter()) {
            assert!((*r / 20.0 - *s).norm() < 1e-12);
        }
    }

    #[test]
    fn test_fft_linearity() {
        let mut engine = FftEngine::new();
        let a: Vec<Complex64> = (0..48)
            .map(|i| Complex64::new((i as f64 * 0.7).sin(), (i as f64 * 0.2).cos()))
            .collect();
        let b: Vec<Complex64> = (0..48)
            .map(|i| Complex64::new(i as f64 * 0.01, -(i as f64 * 1.3).sin()))
            .collect();
        let sum: Vec<Complex64> = a.iter().zip(b.iter()).map(|(x, y)| *x + *y).collect();

        let fa = fft(&mut engine, &a).unwrap();
        let fb = fft(&mut engine, &b).unwrap();
        let fsum = fft(&mut engine, &sum).unwrap();

        for k in 0..48 {
            assert!((fa[k] + fb[k] - fsum[k]).norm() < 1e-10);
        }
    }

    #[test]
    fn test_psd_divisor() {
        let mut engine = FftEngine::new();
        let samples = tone(16, 2, 1.0);
        let sample_rate = 8000.0;

        let psd = power_spectral_density(&mut engine, &samples, sample_rate).unwrap();
        // |X[2]|² = 16², divided by N · fs
        assert!((psd[2] - 256.0 / (16.0 * sample_rate)).abs() < 1e-12);

        let pgram = periodogram(&mut engine, &samples).unwrap();
        assert!((pgram[2] - 16.0).abs() < 1e-9);
        assert!((psd[2] * sample_rate - pgram[2]).abs() < 1e-9);
    }

    #[test]
    fn test_psd_of_zeros() {
        let mut engine = FftEngine::new();
        let zeros = vec![Complex64::new(0.0, 0.0); 64];

        let psd = power_spectral_density(&mut engine, &zeros, 1e6).unwrap();
        assert_eq!(psd.len(), 64);
        assert!(psd.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_psd_rejects_bad_sample_rate() {
        let mut engine = FftEngine::new();
        let samples = tone(8, 1, 1.0);

        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                power_spectral_density(&mut engine, &samples, rate),
                Err(IqError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_empty_input() {
        let mut engine = FftEngine::new();
        assert!(matches!(fft(&mut engine, &[]), Err(IqError::EmptyInput)));
        assert!(matches!(periodogram(&mut engine, &[]), Err(IqError::EmptyInput)));
        assert!(matches!(
            power_spectral_density(&mut engine, &[], 1.0),
            Err(IqError::EmptyInput)
        ));
    }
}
