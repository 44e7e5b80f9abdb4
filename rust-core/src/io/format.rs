//! Source descriptors: how raw bytes map onto IQ samples

use crate::error::{IqError, Result};
use std::path::Path;

/// Scalar encoding of one I or Q element in a binary capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleEncoding {
    /// 32-bit IEEE float (8 bytes per complex sample)
    #[default]
    Float32,

    /// 64-bit IEEE float (16 bytes per complex sample)
    Float64,

    /// Signed 16-bit integer, raw counts (4 bytes per complex sample)
    Int16,
}

impl SampleEncoding {
    /// Width of a single scalar element in bytes
    pub const fn element_width(&self) -> usize {
        match self {
            SampleEncoding::Float32 => 4,
            SampleEncoding::Float64 => 8,
            SampleEncoding::Int16 => 2,
        }
    }

    /// Width of one interleaved (I, Q) pair in bytes
    pub const fn sample_width(&self) -> usize {
        2 * self.element_width()
    }

    /// Parse an encoding name such as `"float32"`, `"f64"` or `"int16"`
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "float32" | "f32" | "cf32" => Ok(SampleEncoding::Float32),
            "float64" | "f64" | "cf64" => Ok(SampleEncoding::Float64),
            "int16" | "i16" | "ci16" => Ok(SampleEncoding::Int16),
            other => Err(IqError::InvalidFormat(format!(
                "unknown sample encoding '{}'",
                other
            ))),
        }
    }
}

/// Container layout of an IQ source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    /// Headerless interleaved I/Q scalars (`.bin`, `.iq`)
    Binary,

    /// Delimited text with a header row naming the I and Q columns (`.csv`, `.txt`)
    Delimited,
}

impl ContainerFormat {
    /// Infer the container from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "bin" | "iq" => Ok(ContainerFormat::Binary),
            "csv" | "txt" => Ok(ContainerFormat::Delimited),
            _ => Err(IqError::InvalidFormat(format!(
                "unsupported file extension '.{}' for {} (expected .bin, .iq, .csv or .txt)",
                ext,
                path.display()
            ))),
        }
    }
}

/// Header names of the real and imaginary columns in delimited sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub real: String,
    pub imaginary: String,
}

impl ColumnNames {
    pub fn new(real: impl Into<String>, imaginary: impl Into<String>) -> Self {
        Self {
            real: real.into(),
            imaginary: imaginary.into(),
        }
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self::new("Real", "Imaginary")
    }
}

/// How to interpret an IQ source
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDescriptor {
    /// Element encoding for binary containers (ignored for text)
    pub encoding: SampleEncoding,

    /// Explicit container; `None` infers it from the file extension
    pub container: Option<ContainerFormat>,

    /// Columns to read from delimited text
    pub columns: ColumnNames,

    /// Field delimiter for delimited text
    pub delimiter: char,
}

impl Default for SourceDescriptor {
    fn default() -> Self {
        Self {
            encoding: SampleEncoding::default(),
            container: None,
            columns: ColumnNames::default(),
            delimiter: ',',
        }
    }
}

impl SourceDescriptor {
    /// Descriptor for a source of the given element encoding
    pub fn new(encoding: SampleEncoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    /// Use custom column names for delimited text
    pub fn with_columns(mut self, real: impl Into<String>, imaginary: impl Into<String>) -> Self {
        self.columns = ColumnNames::new(real, imaginary);
        self
    }

    /// Force a container instead of inferring it from the extension
    pub fn with_container(mut self, container: ContainerFormat) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Container to use for `path`
    pub fn resolve_container(&self, path: &Path) -> Result<ContainerFormat> {
        match self.container {
            Some(container) => Ok(container),
            None => ContainerFormat::from_path(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_widths() {
        assert_eq!(SampleEncoding::Float32.sample_width(), 8);
        assert_eq!(SampleEncoding::Float64.sample_width(), 16);
        assert_eq!(SampleEncoding::Int16.sample_width(), 4);
    }

    #[test]
    fn test_encoding_names() {
        assert_eq!(SampleEncoding::from_name("FLOAT64").unwrap(), SampleEncoding::Float64);
        assert_eq!(SampleEncoding::from_name("i16").unwrap(), SampleEncoding::Int16);
        assert!(matches!(SampleEncoding::from_name("u8"), Err(IqError::InvalidFormat(_))));
    }

    #[test]
    fn test_container_from_extension() {
        assert_eq!(ContainerFormat::from_path(Path::new("a.iq")).unwrap(), ContainerFormat::Binary);
        assert_eq!(ContainerFormat::from_path(Path::new("a.BIN")).unwrap(), ContainerFormat::Binary);
        assert_eq!(ContainerFormat::from_path(Path::new("a.CSV")).unwrap(), ContainerFormat::Delimited);
        assert_eq!(ContainerFormat::from_path(Path::new("a.txt")).unwrap(), ContainerFormat::Delimited);
        assert!(matches!(
            ContainerFormat::from_path(Path::new("capture.wav")),
            Err(IqError::InvalidFormat(_))
        ));
        assert!(ContainerFormat::from_path(Path::new("capture")).is_err());
    }

    #[test]
    fn test_explicit_container_wins() {
        let desc = SourceDescriptor::default().with_container(ContainerFormat::Binary);
        assert_eq!(desc.resolve_container(Path::new("capture.dat")).unwrap(), ContainerFormat::Binary);
    }

    #[test]
    fn test_default_columns() {
        let desc = SourceDescriptor::default();
        assert_eq!(desc.columns.real, "Real");
        assert_eq!(desc.columns.imaginary, "Imaginary");
        assert_eq!(desc.delimiter, ',');
    }
}
