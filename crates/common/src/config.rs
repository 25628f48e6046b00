//! Configuration for playback cadence and session reporting.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Verbosity of the session protocol log.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProtocolLevel {
    /// No protocol output.
    Silent,
    /// Session milestones only.
    #[default]
    Session,
    /// Milestones plus per-frame inclusion/exclusion lists.
    Detailed,
}

/// Playback controller configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Minimum delay between advancement polls.
    pub tick: Duration,
}

impl PlayerConfig {
    pub fn with_tick(tick: Duration) -> Self {
        Self { tick }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
        }
    }
}
