//! Headerless interleaved binary captures
//!
//! Layout: I0 Q0 I1 Q1 ... as little-endian scalars of one encoding.

use super::format::SampleEncoding;
use crate::error::{IqError, Result};
use crate::samples::SampleSequence;
use byteorder::{ByteOrder, LittleEndian};
use num_complex::Complex64;

/// Decode interleaved I/Q scalars into complex samples
///
/// The byte length must be an exact multiple of one complex sample's width;
/// trailing partial samples are rejected rather than dropped.
pub fn decode_binary(bytes: &[u8], encoding: SampleEncoding) -> Result<SampleSequence> {
    let sample_width = encoding.sample_width();
    if bytes.len() % sample_width != 0 {
        return Err(IqError::MalformedData(format!(
            "{} bytes is not a multiple of the {}-byte {:?} sample width ({} trailing bytes)",
            bytes.len(),
            sample_width,
            encoding,
            bytes.len() % sample_width
        )));
    }

    let num_elements = bytes.len() / encoding.element_width();
    let elements = match encoding {
        SampleEncoding::Float32 => {
            let mut buf = vec![0.0f32; num_elements];
            LittleEndian::read_f32_into(bytes, &mut buf);
            buf.into_iter().map(f64::from).collect::<Vec<_>>()
        }
        SampleEncoding::Float64 => {
            let mut buf = vec![0.0f64; num_elements];
            LittleEndian::read_f64_into(bytes, &mut buf);
            buf
        }
        SampleEncoding::Int16 => {
            let mut buf = vec![0i16; num_elements];
            LittleEndian::read_i16_into(bytes, &mut buf);
            buf.into_iter().map(f64::from).collect::<Vec<_>>()
        }
    };

    Ok(elements
        .chunks_exact(2)
        .map(|iq| Complex64::new(iq[0], iq[1]))
        .collect())
}
