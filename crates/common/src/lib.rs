//! `sift-common`: shared types, traits, and errors for the StackSift review engine.
//!
//! This crate is the foundation the session and player crates depend on.
//! It defines the core abstractions:
//!
//! - **Types**: `FrameIndex`, `Playhead` (0-based indices, shared cursor)
//! - **Store**: `FrameSource`, `MonoFrame`, `InMemoryFrames` (image seam)
//! - **Errors**: `SelectionError`, `StoreError` (thiserror-based)
//! - **Config**: `PlayerConfig`, `ProtocolLevel`

pub mod config;
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{PlayerConfig, ProtocolLevel};
pub use error::{SelectionError, SelectionResult, StoreError, StoreResult};
pub use store::{FrameSource, InMemoryFrames, MonoFrame};
pub use types::{FrameIndex, Playhead};
