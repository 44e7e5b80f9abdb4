//! IQ Spectral Core - IQ sample readers and spectral estimators
//!
//! Reads raw IQ captures (interleaved binary or delimited text) and computes
//! FFTs, power spectral densities and overlapped dB spectrograms. Optional
//! Python bindings live behind the `python` feature.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod io;
pub mod samples;
pub mod spectrum;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{IqError, Result};
pub use io::{read_iq, read_iq_from, ColumnNames, ContainerFormat, SampleEncoding, SourceDescriptor};
pub use samples::SampleSequence;
pub use spectrum::{FftEngine, IqAnalyzer, SpectralTransform, Spectrogram, SpectrogramConfig};
