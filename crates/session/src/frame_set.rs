//! Committed per-frame inclusion bookkeeping.

use serde::{Deserialize, Serialize};

use sift_common::{FrameIndex, SelectionError, SelectionResult};

/// Committed inclusion flags for a frame stack.
///
/// One boolean per original frame; `true` means the frame participates in
/// the downstream stacking workflow. The included count is derived from
/// the flags, so it cannot drift out of step with them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSet {
    included: Vec<bool>,
}

impl FrameSet {
    /// New set with every frame included, the state a freshly ranked
    /// stack starts in.
    pub fn all_included(frame_count: usize) -> Self {
        Self {
            included: vec![true; frame_count],
        }
    }

    /// Restore a set from existing flags.
    pub fn from_flags(flags: Vec<bool>) -> Self {
        Self { included: flags }
    }

    /// Total number of frames, included or not.
    pub fn frame_count(&self) -> usize {
        self.included.len()
    }

    /// Number of frames currently marked included.
    pub fn included_count(&self) -> usize {
        self.included.iter().filter(|&&f| f).count()
    }

    /// Whether `index` is currently included. Out-of-range reads as false.
    pub fn is_included(&self, index: FrameIndex) -> bool {
        self.included.get(index.0).copied().unwrap_or(false)
    }

    /// The full flag vector, ordered by frame index.
    pub fn flags(&self) -> &[bool] {
        &self.included
    }

    /// Replace the full flag vector in one assignment.
    ///
    /// The replacement must cover the same number of frames; a session
    /// commit is the normal caller.
    pub fn set_flags(&mut self, flags: Vec<bool>) -> SelectionResult<()> {
        if flags.len() != self.included.len() {
            return Err(SelectionError::FlagCountMismatch {
                working: flags.len(),
                committed: self.included.len(),
            });
        }
        tracing::debug!(
            included = flags.iter().filter(|&&f| f).count(),
            total = flags.len(),
            "Inclusion flags replaced"
        );
        self.included = flags;
        Ok(())
    }
}
