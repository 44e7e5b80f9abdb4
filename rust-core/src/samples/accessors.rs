//! Range-bounded views over materialized IQ samples
//!
//! A range is `[start, end)`. `end` past the last sample is clamped to the
//! sequence length; every other bad range is reported as `InvalidRange`.

use crate::error::{IqError, Result};
use num_complex::Complex64;
use std::ops::Range;

/// Validate `range` against a collection of `len` samples
///
/// # Returns
/// The range with `end` clamped to `len`
pub fn resolve_range(len: usize, range: Range<usize>) -> Result<Range<usize>> {
    if len == 0 || range.end <= range.start || range.start >= len {
        return Err(IqError::InvalidRange {
            start: range.start as i64,
            end: range.end as i64,
            len,
        });
    }

    Ok(range.start..range.end.min(len))
}

/// Resolve optional signed bounds, as supplied by callers with signed indices
///
/// Both bounds absent means the whole sequence (`None`). A single missing
/// bound defaults to `0` or `len`; negative bounds are an invalid range.
pub fn resolve_signed_range(
    len: usize,
    start: Option<i64>,
    end: Option<i64>,
) -> Result<Option<Range<usize>>> {
    if start.is_none() && end.is_none() {
        return Ok(None);
    }

    let start = start.unwrap_or(0);
    let end = end.unwrap_or(len as i64);
    match (usize::try_from(start), usize::try_from(end)) {
        (Ok(s), Ok(e)) => resolve_range(len, s..e).map(Some),
        _ => Err(IqError::InvalidRange { start, end, len }),
    }
}

/// Real components of `samples[range]`
pub fn real_part(samples: &[Complex64], range: Range<usize>) -> Result<Vec<f64>> {
    let range = resolve_range(samples.len(), range)?;
    Ok(samples[range].iter().map(|c| c.re).collect())
}

/// Imaginary components of `samples[range]`
pub fn imaginary_part(samples: &[Complex64], range: Range<usize>) -> Result<Vec<f64>> {
    let range = resolve_range(samples.len(), range)?;
    Ok(samples[range].iter().map(|c| c.im).collect())
}

/// `[real, imaginary]` pairs of `samples[range]`
pub fn iq_pairs(samples: &[Complex64], range: Range<usize>) -> Result<Vec<[f64; 2]>> {
    let range = resolve_range(samples.len(), range)?;
    Ok(samples[range].iter().map(|c| [c.re, c.im]).collect())
}
