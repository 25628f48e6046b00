//! Core types with newtype pattern for type safety.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Frame index (0-based position in the frame stack).
///
/// Indices are counted from 0 internally; everything user-facing
/// (protocol lines, frame labels) counts from 1 via [`ordinal`].
///
/// [`ordinal`]: FrameIndex::ordinal
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameIndex(pub usize);

impl FrameIndex {
    pub const FIRST: Self = Self(0);

    /// 1-based display number for this index.
    pub fn ordinal(self) -> usize {
        self.0 + 1
    }
}

impl Add<usize> for FrameIndex {
    type Output = Self;
    fn add(self, rhs: usize) -> Self {
        Self(self.0 + rhs)
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {}", self.ordinal())
    }
}

/// Shared current-frame cursor.
///
/// Cloning shares the underlying position, so the review session, the
/// playback loop, and the front-end all observe the same playhead. Writes
/// race as last-write-wins: the playback loop advances the cursor while a
/// user seek may store a new position, and whichever store lands last is
/// the position the next reader sees. Front-ends are expected to disable
/// manual seeking while playback runs.
#[derive(Clone, Default)]
pub struct Playhead {
    position: Arc<AtomicUsize>,
}

impl Playhead {
    pub fn new(start: FrameIndex) -> Self {
        Self {
            position: Arc::new(AtomicUsize::new(start.0)),
        }
    }

    /// Current position. Relaxed: the position is an independent counter,
    /// not a guard for other data.
    pub fn position(&self) -> FrameIndex {
        FrameIndex(self.position.load(Ordering::Relaxed))
    }

    /// Move the cursor. Last write wins against a concurrent advance.
    pub fn seek(&self, to: FrameIndex) {
        self.position.store(to.0, Ordering::Relaxed);
    }
}

impl fmt::Debug for Playhead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Playhead")
            .field("position", &self.position())
            .finish()
    }
}
