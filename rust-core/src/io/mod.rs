//! IQ sample readers for binary and delimited-text sources

pub mod binary;
pub mod delimited;
pub mod format;

pub use binary::decode_binary;
pub use delimited::decode_delimited;
pub use format::{ColumnNames, ContainerFormat, SampleEncoding, SourceDescriptor};

use crate::error::{IqError, Result};
use crate::samples::SampleSequence;
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read every IQ sample from a file
///
/// # Arguments
/// * `path` - `.bin`/`.iq` binary capture or `.csv`/`.txt` text capture
/// * `descriptor` - Element encoding, container override and text columns
///
/// # Errors
/// `InvalidSource` if the file is missing or unreadable, `InvalidFormat` for an
/// unsupported extension, `MalformedData` for misaligned or unparsable data,
/// `InvalidSchema` if a text column is absent.
pub fn read_iq(path: impl AsRef<Path>, descriptor: &SourceDescriptor) -> Result<SampleSequence> {
    let path = path.as_ref();
    let name = path.display().to_string();

    if !path.exists() {
        return Err(IqError::source_io(
            name,
            std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        ));
    }

    let container = descriptor.resolve_container(path)?;
    let file = File::open(path).map_err(|e| IqError::source_io(name.clone(), e))?;

    debug!("Reading {:?} IQ source {} ({:?})", container, name, descriptor.encoding);
    read_container(file, container, descriptor, &name)
}

/// Read every IQ sample from an in-memory buffer or stream
///
/// The container cannot be inferred without a file name, so it is passed
/// explicitly.
pub fn read_iq_from<R: Read>(
    reader: R,
    container: ContainerFormat,
    descriptor: &SourceDescriptor,
) -> Result<SampleSequence> {
    read_container(reader, container, descriptor, "stream")
}

fn read_container<R: Read>(
    reader: R,
    container: ContainerFormat,
    descriptor: &SourceDescriptor,
    name: &str,
) -> Result<SampleSequence> {
    let samples = match container {
        ContainerFormat::Binary => {
            let mut bytes = Vec::new();
            BufReader::new(reader)
                .read_to_end(&mut bytes)
                .map_err(|e| IqError::source_io(name, e))?;
            decode_binary(&bytes, descriptor.encoding)?
        }
        ContainerFormat::Delimited => {
            decode_delimited(BufReader::new(reader), &descriptor.columns, descriptor.delimiter)?
        }
    };

    debug!("Read {} IQ samples from {}", samples.len(), name);
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{LittleEndian, WriteBytesExt};
    use num_complex::Complex64;
    use std::io::{Cursor, Write};

    fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn test_read_binary_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = Vec::new();
        for v in [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0] {
            bytes.write_f64::<LittleEndian>(v).unwrap();
        }
        let path = write_file(&dir, "capture.iq", &bytes);

        let seq = read_iq(&path, &SourceDescriptor::new(SampleEncoding::Float64)).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq[2], Complex64::new(5.0, 6.0));
    }

    #[test]
    fn test_read_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "capture.csv", b"Real,Imaginary\n1,-1\n2,-2\n");

        let seq = read_iq(&path, &SourceDescriptor::default()).unwrap();
        assert_eq!(seq.to_pairs(), vec![[1.0, -1.0], [2.0, -2.0]]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");

        assert!(matches!(
            read_iq(&path, &SourceDescriptor::default()),
            Err(IqError::InvalidSource { .. })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "capture.wav", &[0u8; 8]);

        assert!(matches!(
            read_iq(&path, &SourceDescriptor::default()),
            Err(IqError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_misaligned_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "capture.bin", &[0u8; 10]);

        assert!(matches!(
            read_iq(&path, &SourceDescriptor::new(SampleEncoding::Float32)),
            Err(IqError::MalformedData(_))
        ));
    }

    #[test]
    fn test_read_from_stream() {
        let mut bytes = Vec::new();
        for v in [7i16, -7, 100, -100] {
            bytes.write_i16::<LittleEndian>(v).unwrap();
        }

        let seq = read_iq_from(
            Cursor::new(bytes),
            ContainerFormat::Binary,
            &SourceDescriptor::new(SampleEncoding::Int16),
        )
        .unwrap();
        assert_eq!(seq.to_pairs(), vec![[7.0, -7.0], [100.0, -100.0]]);
    }
}
