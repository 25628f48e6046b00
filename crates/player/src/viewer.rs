//! Display-side consumer of playback events.
//!
//! [`FrameViewer`] turns a `ShowFrame` event into an actual frame load,
//! holding the busy gate for the duration so the playback loop stalls
//! instead of running ahead of the display.

use tracing::warn;

use sift_common::{FrameIndex, FrameSource, MonoFrame};

use crate::gate::LoadGate;

/// Loads and caches the frame under the playhead.
///
/// One viewer per front-end view. The cached frame survives a failed
/// load, so the view keeps showing the last good frame while the error
/// is reported out of band.
#[derive(Debug)]
pub struct FrameViewer<S: FrameSource> {
    source: S,
    gate: LoadGate,
    current: Option<(FrameIndex, MonoFrame)>,
}

impl<S: FrameSource> FrameViewer<S> {
    /// Create a viewer over `source`, sharing the player's busy gate.
    pub fn new(source: S, gate: LoadGate) -> Self {
        Self {
            source,
            gate,
            current: None,
        }
    }

    /// Load `index` and make it the current frame.
    ///
    /// The busy gate is held across the load so the playback loop does
    /// not advance past a frame the display has not finished with. On a
    /// failed load the previous frame stays current and `None` is
    /// returned.
    pub fn show(&mut self, index: FrameIndex) -> Option<&MonoFrame> {
        let _token = self.gate.begin();
        match self.source.load_frame(index) {
            Ok(frame) => {
                let (_, frame) = self.current.insert((index, frame));
                Some(frame)
            }
            Err(e) => {
                warn!(%index, error = %e, "Frame load failed; keeping previous frame");
                None
            }
        }
    }

    /// The most recently shown frame, if any load has succeeded.
    pub fn current(&self) -> Option<(FrameIndex, &MonoFrame)> {
        self.current.as_ref().map(|(index, frame)| (*index, frame))
    }

    /// Frame count of the underlying source.
    pub fn frame_count(&self) -> usize {
        self.source.frame_count()
    }
}
