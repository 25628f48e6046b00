//! `sift-player`: cooperative frame playback for the StackSift review
//! engine.
//!
//! - [`FramePlayer`] drives the playhead on a worker thread and emits
//!   [`PlayerEvent`]s to the front-end.
//! - [`LoadGate`] is the busy flag the display side holds while a frame
//!   is being loaded and presented.
//! - [`FrameViewer`] consumes `ShowFrame` events, loading frames from a
//!   [`sift_common::FrameSource`] under the gate.

pub mod gate;
pub mod player;
pub mod viewer;

pub use gate::{LoadGate, LoadToken};
pub use player::{FramePlayer, PlayerEvent, PlayerState, StopReason};
pub use viewer::FrameViewer;
