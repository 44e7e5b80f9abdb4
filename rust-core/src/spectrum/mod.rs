//! Spectral analysis of IQ sequences

pub mod analysis;
pub mod fft;
pub mod psd;
pub mod spectrogram;
pub mod windowing;

pub use analysis::IqAnalyzer;
pub use fft::{bin_frequencies, FftEngine, SpectralTransform};
pub use psd::{fft, periodogram, power_spectral_density};
pub use spectrogram::{power_to_db, spectrogram, Spectrogram, SpectrogramConfig, DB_FLOOR};
pub use windowing::{frames, Frame, FrameLayout, Frames};
