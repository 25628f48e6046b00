//! Error types for the review engine (thiserror-based).

use thiserror::Error;

use crate::types::FrameIndex;

/// Errors raised by selection/session operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// A batch command was issued with no selected indices.
    #[error("Selection is empty")]
    EmptySelection,

    /// A selection or seek referenced an index past the end of the stack.
    #[error("Frame index {index} out of range ({frame_count} frames)")]
    IndexOutOfRange { index: usize, frame_count: usize },

    /// The working copy and the frame set disagree on length.
    #[error("Working copy covers {working} frames but the frame set holds {committed}")]
    FlagCountMismatch { working: usize, committed: usize },
}

/// Errors raised by a frame source.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The source could not produce an image for the index.
    #[error("Failed to load {index}: {reason}")]
    FrameUnavailable { index: FrameIndex, reason: String },

    /// File I/O error inside the source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for selection operations.
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Convenience Result type for frame source operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = SelectionError::IndexOutOfRange {
            index: 9,
            frame_count: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains('9') && msg.contains('5'));

        let err = SelectionError::FlagCountMismatch {
            working: 5,
            committed: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains('5') && msg.contains('7'));

        let err = StoreError::FrameUnavailable {
            index: FrameIndex(4),
            reason: "decode failed".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("frame 5") && msg.contains("decode failed"));
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::Io(_)));
    }
}
