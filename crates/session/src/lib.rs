//! `sift-session`: frame selection sessions for the StackSift review engine.
//!
//! Everything needed to review which frames of a stack go into the
//! stacking workflow:
//!
//! - **FrameSet**: committed per-frame inclusion flags
//! - **ReviewSession**: working-copy editing session (include/exclude,
//!   commit or discard)
//! - **ChangeReport**: net result of a commit
//! - **Protocol**: append-only session log
//!
//! A session never touches the committed flags until `commit`; canceling
//! with `discard` leaves the frame set exactly as it was.

pub mod frame_set;
pub mod protocol;
pub mod report;
pub mod review;

// Re-export commonly used items at crate root
pub use frame_set::FrameSet;
pub use protocol::Protocol;
pub use report::ChangeReport;
pub use review::{ReviewSession, SelectionEdit};
