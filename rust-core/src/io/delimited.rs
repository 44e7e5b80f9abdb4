//! Delimited text captures with a header row
//!
//! Rows missing the I or Q field are skipped with a warning. A field that is
//! present but not a number aborts the whole read.

use super::format::ColumnNames;
use crate::error::{IqError, Result};
use crate::samples::SampleSequence;
use log::{debug, warn};
use num_complex::Complex64;
use std::io::BufRead;

/// Positions of the I and Q columns within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    real: usize,
    imaginary: usize,
}

impl ColumnIndex {
    fn resolve(header: &str, columns: &ColumnNames, delimiter: char) -> Result<Self> {
        let names: Vec<String> = header
            .split(delimiter)
            .map(|name| name.trim().to_string())
            .collect();

        let position = |wanted: &str| {
            names
                .iter()
                .position(|name| name == wanted)
                .ok_or_else(|| IqError::InvalidSchema {
                    column: wanted.to_string(),
                    available: names.clone(),
                })
        };

        Ok(Self {
            real: position(&columns.real)?,
            imaginary: position(&columns.imaginary)?,
        })
    }

    fn max(&self) -> usize {
        self.real.max(self.imaginary)
    }
}

/// Undecodable text is corrupt content; anything else is a failing source
fn line_error(line_number: usize, err: std::io::Error) -> IqError {
    if err.kind() == std::io::ErrorKind::InvalidData {
        IqError::MalformedData(format!("line {}: invalid UTF-8", line_number))
    } else {
        IqError::source_io(format!("delimited line {}", line_number), err)
    }
}

/// Decode delimited text into complex samples
///
/// # Arguments
/// * `reader` - Text source; the first line is the header
/// * `columns` - Header names of the I and Q columns
/// * `delimiter` - Field separator
pub fn decode_delimited<R: BufRead>(
    reader: R,
    columns: &ColumnNames,
    delimiter: char,
) -> Result<SampleSequence> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line.map_err(|e| line_error(1, e))?,
        None => {
            return Err(IqError::InvalidSchema {
                column: columns.real.clone(),
                available: Vec::new(),
            })
        }
    };
    let index = ColumnIndex::resolve(&header, columns, delimiter)?;

    let mut samples = Vec::new();
    let mut skipped = 0usize;

    for (row, line) in lines.enumerate() {
        let line_number = row + 2;
        let line = line.map_err(|e| line_error(line_number, e))?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
        if fields.len() <= index.max() {
            warn!("Skipping incomplete line {}: {:?}", line_number, line);
            skipped += 1;
            continue;
        }

        let parse = |field: &str| {
            field.parse::<f64>().map_err(|e| {
                IqError::MalformedData(format!(
                    "line {}: cannot parse '{}' as a number ({})",
                    line_number, field, e
                ))
            })
        };

        samples.push(Complex64::new(
            parse(fields[index.real])?,
            parse(fields[index.imaginary])?,
        ));
    }

    debug!(
        "Decoded {} delimited IQ samples ({} incomplete lines skipped)",
        samples.len(),
        skipped
    );

    Ok(SampleSequence::new(samples))
}
