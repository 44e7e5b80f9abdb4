//! Python bindings for IQ reading and spectral analysis

use pyo3::prelude::*;
use pyo3::exceptions::{PyIOError, PyValueError};
use numpy::{PyArray1, PyArray2, PyReadonlyArray2};
use num_complex::Complex64;
use std::ops::Range;
use std::path::PathBuf;
use crate::error::IqError;
use crate::io::{SampleEncoding, SourceDescriptor};
use crate::samples::{resolve_signed_range, SampleSequence};
use crate::spectrum::{periodogram, IqAnalyzer, SpectrogramConfig};

impl From<IqError> for PyErr {
    fn from(err: IqError) -> PyErr {
        match err {
            IqError::InvalidSource { .. } => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// IQ element encoding exposed to Python
#[pyclass(name = "DataType")]
#[derive(Clone)]
pub enum PyDataType {
    Float32,
    Float64,
    Int16,
}

impl From<PyDataType> for SampleEncoding {
    fn from(py_type: PyDataType) -> Self {
        match py_type {
            PyDataType::Float32 => SampleEncoding::Float32,
            PyDataType::Float64 => SampleEncoding::Float64,
            PyDataType::Int16 => SampleEncoding::Int16,
        }
    }
}

fn descriptor(data_type: PyDataType, columns: Option<(String, String)>) -> SourceDescriptor {
    let desc = SourceDescriptor::new(data_type.into());
    match columns {
        Some((real, imaginary)) => desc.with_columns(real, imaginary),
        None => desc,
    }
}

/// Python indices are signed; negative bounds are an invalid range here
fn sample_range(start: i64, end: i64, len: usize) -> PyResult<Range<usize>> {
    match resolve_signed_range(len, Some(start), Some(end))? {
        Some(range) => Ok(range),
        None => Err(IqError::InvalidRange { start, end, len }.into()),
    }
}

/// `(N, 2)` float array of [real, imaginary] rows
fn samples_from_array(samples: &PyReadonlyArray2<f64>) -> PyResult<SampleSequence> {
    let view = samples.as_array();
    if view.ncols() != 2 {
        return Err(IqError::MalformedData(format!(
            "expected an (N, 2) array of [real, imaginary] rows, got {:?}",
            view.shape()
        ))
        .into());
    }

    Ok(view
        .rows()
        .into_iter()
        .map(|row| Complex64::new(row[0], row[1]))
        .collect())
}

fn pairs_to_array<'py>(py: Python<'py>, sequence: &SampleSequence) -> &'py PyArray2<f64> {
    PyArray2::from_owned_array(py, sequence.to_pairs_array())
}

fn spectrum_to_array<'py>(py: Python<'py>, spectrum: &[Complex64]) -> &'py PyArray2<f64> {
    let sequence: SampleSequence = spectrum.iter().copied().collect();
    pairs_to_array(py, &sequence)
}

/// IQ analyzer exposed to Python
#[pyclass(name = "Analyzer", unsendable)]
pub struct PyAnalyzer {
    analyzer: IqAnalyzer,
}

#[pymethods]
impl PyAnalyzer {
    #[new]
    fn new() -> Self {
        Self {
            analyzer: IqAnalyzer::new(),
        }
    }

    /// Read IQ samples from a file
    ///
    /// Args:
    ///     path: .bin/.iq binary capture or .csv/.txt text capture
    ///     data_type: Element encoding of binary captures
    ///     start: First sample (optional)
    ///     end: One past the last sample, clamped to the file length (optional)
    ///     columns: (real, imaginary) header names for text captures
    ///
    /// Returns:
    ///     (N, 2) array of [real, imaginary] rows
    #[pyo3(signature = (path, data_type=PyDataType::Float32, start=None, end=None, columns=None))]
    fn get_iq_samples<'py>(
        &self,
        py: Python<'py>,
        path: PathBuf,
        data_type: PyDataType,
        start: Option<i64>,
        end: Option<i64>,
        columns: Option<(String, String)>,
    ) -> PyResult<&'py PyArray2<f64>> {
        let desc = descriptor(data_type, columns);
        let sequence = self.analyzer.read_iq(&path, &desc)?;

        match resolve_signed_range(sequence.len(), start, end)? {
            None => Ok(pairs_to_array(py, &sequence)),
            Some(range) => {
                let pairs = crate::samples::iq_pairs(&sequence, range)?;
                Ok(pairs_to_array(py, &SampleSequence::from_pairs(&pairs)))
            }
        }
    }

    /// FFT of a file, scaled by 1/N
    ///
    /// Returns:
    ///     (N, 2) array of [real, imaginary] bins in unshifted order
    #[pyo3(signature = (path, data_type=PyDataType::Float32, start=None, end=None))]
    fn fft_file<'py>(
        &mut self,
        py: Python<'py>,
        path: PathBuf,
        data_type: PyDataType,
        start: Option<i64>,
        end: Option<i64>,
    ) -> PyResult<&'py PyArray2<f64>> {
        let sequence = self.analyzer.read_iq(&path, &descriptor(data_type, None))?;
        let spectrum = match resolve_signed_range(sequence.len(), start, end)? {
            None => self.analyzer.fft(&sequence)?,
            Some(range) => self.analyzer.fft(&sequence[range])?,
        };
        Ok(spectrum_to_array(py, &spectrum))
    }

    /// FFT of an (N, 2) sample array, scaled by 1/N
    fn fft<'py>(
        &mut self,
        py: Python<'py>,
        samples: PyReadonlyArray2<f64>,
    ) -> PyResult<&'py PyArray2<f64>> {
        let sequence = samples_from_array(&samples)?;
        let spectrum = self.analyzer.fft(&sequence)?;
        Ok(spectrum_to_array(py, &spectrum))
    }

    /// Power spectral density of a file, |X|² / (N · sample_rate)
    #[pyo3(signature = (path, sample_rate, data_type=PyDataType::Float32))]
    fn calculate_psd_file<'py>(
        &mut self,
        py: Python<'py>,
        path: PathBuf,
        sample_rate: f64,
        data_type: PyDataType,
    ) -> PyResult<&'py PyArray1<f64>> {
        let psd = self
            .analyzer
            .calculate_psd_file(&path, sample_rate, &descriptor(data_type, None))?;
        Ok(PyArray1::from_vec(py, psd))
    }

    /// |X|² / N over samples [start, end) of a file
    #[pyo3(signature = (path, start, end, data_type=PyDataType::Float32))]
    fn calculate_psd_range<'py>(
        &mut self,
        py: Python<'py>,
        path: PathBuf,
        start: i64,
        end: i64,
        data_type: PyDataType,
    ) -> PyResult<&'py PyArray1<f64>> {
        let sequence = self.analyzer.read_iq(&path, &descriptor(data_type, None))?;
        let range = sample_range(start, end, sequence.len())?;
        let psd = periodogram(self.analyzer.transform_mut(), &sequence[range])?;
        Ok(PyArray1::from_vec(py, psd))
    }

    /// Power spectral density of an (N, 2) sample array
    fn calculate_psd<'py>(
        &mut self,
        py: Python<'py>,
        samples: PyReadonlyArray2<f64>,
        sample_rate: f64,
    ) -> PyResult<&'py PyArray1<f64>> {
        let sequence = samples_from_array(&samples)?;
        let psd = self.analyzer.calculate_psd(&sequence, sample_rate)?;
        Ok(PyArray1::from_vec(py, psd))
    }

    /// dB spectrogram of a file
    ///
    /// Returns:
    ///     (frames, window_size) array in dB per rad/sample
    #[pyo3(signature = (path, overlap, window_size, sample_rate, data_type=PyDataType::Float32))]
    fn generate_spectrogram_file<'py>(
        &mut self,
        py: Python<'py>,
        path: PathBuf,
        overlap: usize,
        window_size: usize,
        sample_rate: f64,
        data_type: PyDataType,
    ) -> PyResult<&'py PyArray2<f64>> {
        let config = SpectrogramConfig::new(window_size, overlap, sample_rate);
        let spec = self
            .analyzer
            .generate_spectrogram_file(&path, &config, &descriptor(data_type, None))?;
        Ok(PyArray2::from_owned_array(py, spec.to_array()))
    }

    /// dB spectrogram of an (N, 2) sample array
    fn generate_spectrogram<'py>(
        &mut self,
        py: Python<'py>,
        samples: PyReadonlyArray2<f64>,
        overlap: usize,
        window_size: usize,
        sample_rate: f64,
    ) -> PyResult<&'py PyArray2<f64>> {
        let sequence = samples_from_array(&samples)?;
        let config = SpectrogramConfig::new(window_size, overlap, sample_rate);
        let spec = self.analyzer.generate_spectrogram(&sequence, &config)?;
        Ok(PyArray2::from_owned_array(py, spec.to_array()))
    }

    /// Real components of samples [start, end) of an (N, 2) array
    fn real_part<'py>(
        &self,
        py: Python<'py>,
        samples: PyReadonlyArray2<f64>,
        start: i64,
        end: i64,
    ) -> PyResult<&'py PyArray1<f64>> {
        let sequence = samples_from_array(&samples)?;
        let range = sample_range(start, end, sequence.len())?;
        Ok(PyArray1::from_vec(py, self.analyzer.real_part(&sequence, range)?))
    }

    /// Real components of every sample in a file
    #[pyo3(signature = (path, data_type=PyDataType::Float32))]
    fn real_part_file<'py>(
        &self,
        py: Python<'py>,
        path: PathBuf,
        data_type: PyDataType,
    ) -> PyResult<&'py PyArray1<f64>> {
        let re = self.analyzer.real_part_file(&path, &descriptor(data_type, None))?;
        Ok(PyArray1::from_vec(py, re))
    }

    /// Imaginary components of samples [start, end) of an (N, 2) array
    fn imaginary_part<'py>(
        &self,
        py: Python<'py>,
        samples: PyReadonlyArray2<f64>,
        start: i64,
        end: i64,
    ) -> PyResult<&'py PyArray1<f64>> {
        let sequence = samples_from_array(&samples)?;
        let range = sample_range(start, end, sequence.len())?;
        Ok(PyArray1::from_vec(py, self.analyzer.imaginary_part(&sequence, range)?))
    }

    /// Imaginary components of every sample in a file
    #[pyo3(signature = (path, data_type=PyDataType::Float32))]
    fn imaginary_part_file<'py>(
        &self,
        py: Python<'py>,
        path: PathBuf,
        data_type: PyDataType,
    ) -> PyResult<&'py PyArray1<f64>> {
        let im = self.analyzer.imaginary_part_file(&path, &descriptor(data_type, None))?;
        Ok(PyArray1::from_vec(py, im))
    }
}
