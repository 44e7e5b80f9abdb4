//! Error types shared by every stage of the IQ pipeline

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, IqError>;

#[derive(Error, Debug)]
pub enum IqError {
    #[error("Cannot read IQ source {name}: {source}")]
    InvalidSource {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported IQ source format: {0}")]
    InvalidFormat(String),

    #[error("Malformed IQ data: {0}")]
    MalformedData(String),

    #[error("Column '{column}' not found in header (available: {available:?})")]
    InvalidSchema {
        column: String,
        available: Vec<String>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Not enough samples: need {needed}, have {available}")]
    InsufficientSamples { needed: usize, available: usize },

    #[error("Spectral transform input is empty")]
    EmptyInput,

    #[error("Invalid sample range [{start}, {end}) for {len} samples")]
    InvalidRange { start: i64, end: i64, len: usize },
}

impl IqError {
    pub(crate) fn source_io(name: impl Into<String>, source: std::io::Error) -> Self {
        IqError::InvalidSource {
            name: name.into(),
            source,
        }
    }
}
