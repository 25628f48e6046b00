//! Busy gate: the single synchronization point between the playback loop
//! and the image-loading side.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared busy flag for in-flight frame loads.
///
/// The display side holds a [`LoadToken`] while it loads and paints a
/// frame; the playback loop polls [`is_busy`] and never advances while a
/// token is live. Cloning shares the flag.
///
/// [`is_busy`]: LoadGate::is_busy
#[derive(Clone, Debug, Default)]
pub struct LoadGate {
    busy: Arc<AtomicBool>,
}

impl LoadGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a load in flight. The returned token clears the flag when
    /// dropped, so a failed load releases the gate like a successful one.
    pub fn begin(&self) -> LoadToken {
        self.busy.store(true, Ordering::Release);
        LoadToken {
            busy: Arc::clone(&self.busy),
        }
    }

    /// Whether a load is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Live load marker; dropping it releases the gate.
#[must_use = "dropping the token immediately releases the gate"]
pub struct LoadToken {
    busy: Arc<AtomicBool>,
}

impl Drop for LoadToken {
    fn drop(&mut self) {
        // Release pairs with the Acquire in is_busy: when the loop reads
        // the flag as clear, the finished load's effects are visible.
        self.busy.store(false, Ordering::Release);
    }
}
