//! Overlapped frame segmentation of a sample sequence
//!
//! Frames are fixed-size views into the sequence; consecutive frames advance
//! by `hop = window_size - overlap`. The layout is validated up front so no
//! frame ever needs clamping.

use crate::error::{IqError, Result};
use num_complex::Complex64;
use std::ops::Range;

/// Validated frame geometry for a sequence of a given length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// Samples per frame
    pub window_size: usize,

    /// Samples shared by consecutive frames
    pub overlap: usize,

    /// Offset between consecutive frame starts
    pub hop: usize,

    /// Number of complete frames
    pub num_frames: usize,
}

impl FrameLayout {
    /// Compute the frame layout for `len` samples
    ///
    /// # Errors
    /// `InvalidConfiguration` unless `0 < window_size <= len` and
    /// `overlap < window_size`.
    pub fn new(len: usize, window_size: usize, overlap: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(IqError::InvalidConfiguration(
                "window_size must be greater than zero".to_string(),
            ));
        }
        if window_size > len {
            return Err(IqError::InvalidConfiguration(format!(
                "window_size {} is larger than the {} available samples",
                window_size, len
            )));
        }
        if overlap >= window_size {
            return Err(IqError::InvalidConfiguration(format!(
                "overlap {} must be smaller than window_size {}",
                overlap, window_size
            )));
        }

        let hop = window_size - overlap;
        let num_frames = 1 + (len - window_size) / hop;
        if num_frames == 0 {
            return Err(IqError::InsufficientSamples {
                needed: window_size,
                available: len,
            });
        }

        Ok(Self {
            window_size,
            overlap,
            hop,
            num_frames,
        })
    }

    /// Sample range covered by frame `index`
    pub fn frame_range(&self, index: usize) -> Range<usize> {
        let start = index * self.hop;
        start..start + self.window_size
    }

    /// End index (exclusive) of the last frame
    pub fn last_frame_end(&self) -> usize {
        self.frame_range(self.num_frames - 1).end
    }
}

/// One analysis frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    /// Position in time order
    pub index: usize,

    /// Offset of the first sample in the source sequence
    pub start: usize,

    pub samples: &'a [Complex64],
}

/// Restartable collection of frames over a borrowed sequence
#[derive(Debug, Clone, Copy)]
pub struct Frames<'a> {
    samples: &'a [Complex64],
    layout: FrameLayout,
}

impl<'a> Frames<'a> {
    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.layout.num_frames
    }

    pub fn is_empty(&self) -> bool {
        self.layout.num_frames == 0
    }

    /// Enumerate frames from the beginning
    pub fn iter(&self) -> FrameIter<'a> {
        FrameIter {
            samples: self.samples,
            layout: self.layout,
            next: 0,
        }
    }

    /// Frame at `index`, if any
    pub fn get(&self, index: usize) -> Option<Frame<'a>> {
        (index < self.layout.num_frames).then(|| {
            let range = self.layout.frame_range(index);
            Frame {
                index,
                start: range.start,
                samples: &self.samples[range],
            }
        })
    }
}

impl<'a> IntoIterator for Frames<'a> {
    type Item = Frame<'a>;
    type IntoIter = FrameIter<'a>;

    fn into_iter(self) -> FrameIter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &Frames<'a> {
    type Item = Frame<'a>;
    type IntoIter = FrameIter<'a>;

    fn into_iter(self) -> FrameIter<'a> {
        self.iter()
    }
}

/// Iterator over frames in time order
#[derive(Debug, Clone)]
pub struct FrameIter<'a> {
    samples: &'a [Complex64],
    layout: FrameLayout,
    next: usize,
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Frame<'a>> {
        if self.next >= self.layout.num_frames {
            return None;
        }

        let index = self.next;
        self.next += 1;
        let range = self.layout.frame_range(index);
        Some(Frame {
            index,
            start: range.start,
            samples: &self.samples[range],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.layout.num_frames - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameIter<'_> {}

/// Slice `samples` into overlapping frames
///
/// # Arguments
/// * `samples` - Source sequence
/// * `window_size` - Samples per frame
/// * `overlap` - Samples shared between consecutive frames
pub fn frames(samples: &[Complex64], window_size: usize, overlap: usize) -> Result<Frames<'_>> {
    let layout = FrameLayout::new(samples.len(), window_size, overlap)?;
    Ok(Frames { samples, layout })
}
