//! Frame source seam: how the review engine obtains images.
//!
//! Decoding is not this engine's business: frames come from an external
//! collaborator (a video decoder, an image-batch loader, a test fixture).
//! The [`FrameSource`] trait is the whole contract. [`InMemoryFrames`] is
//! the reference implementation for pre-decoded stacks and tests.

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::types::FrameIndex;

/// Grayscale float frame (row-major, one f32 per pixel).
///
/// The stacking pipeline hands the review step monochrome versions of the
/// frames; levels are expected in `[0, 1]` but not enforced.
#[derive(Clone, Debug, PartialEq)]
pub struct MonoFrame {
    /// Luma samples (row-major).
    pub pixels: Vec<f32>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl MonoFrame {
    /// Create a new `MonoFrame` from raw luma samples.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * height`.
    pub fn new(pixels: Vec<f32>, width: u32, height: u32) -> Self {
        assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize),
            "luma data length must match width * height"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Uniform frame filled with a single level.
    pub fn flat(level: f32, width: u32, height: u32) -> Self {
        Self::new(
            vec![level; (width as usize) * (height as usize)],
            width,
            height,
        )
    }

    /// Byte size of the pixel data.
    pub fn byte_size(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<f32>()
    }
}

/// Image half of the frame-source contract.
///
/// `load_frame` may be slow (it can hit a decoder): callers either invoke
/// it off the interactive context, or hold a busy signal while it runs so
/// the playback loop does not advance mid-load.
pub trait FrameSource {
    /// Total number of frames available.
    fn frame_count(&self) -> usize;

    /// Produce the grayscale image for `index`.
    fn load_frame(&self, index: FrameIndex) -> StoreResult<MonoFrame>;
}

/// Pre-decoded frame stack held in memory.
///
/// Suits image-batch inputs (already decoded) and tests. Video-backed
/// sources implement [`FrameSource`] over their decoder instead.
#[derive(Clone, Debug, Default)]
pub struct InMemoryFrames {
    frames: Vec<MonoFrame>,
}

impl InMemoryFrames {
    pub fn new(frames: Vec<MonoFrame>) -> Self {
        debug!(count = frames.len(), "In-memory frame stack created");
        Self { frames }
    }

    /// Stack of `count` uniform frames with levels ramping from 0 to 1,
    /// so individual frames are distinguishable in tests.
    pub fn ramp(count: usize, width: u32, height: u32) -> Self {
        let frames = (0..count)
            .map(|i| {
                let level = if count > 1 {
                    i as f32 / (count - 1) as f32
                } else {
                    0.0
                };
                MonoFrame::flat(level, width, height)
            })
            .collect();
        Self::new(frames)
    }
}

impl FrameSource for InMemoryFrames {
    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn load_frame(&self, index: FrameIndex) -> StoreResult<MonoFrame> {
        self.frames
            .get(index.0)
            .cloned()
            .ok_or_else(|| StoreError::FrameUnavailable {
                index,
                reason: format!("stack holds {} frames", self.frames.len()),
            })
    }
}
