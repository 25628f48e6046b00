//! Playback controller: walks the playhead across the stack on a worker
//! thread.
//!
//! The controller owns a small cooperative loop. Once per tick it checks
//! the run flag, checks whether the display side is still busy with the
//! previous frame, and if not advances the shared playhead by one and
//! emits a [`PlayerEvent::ShowFrame`]. The loop halts on its own at the
//! last frame and halts within one tick of [`FramePlayer::stop`]; it
//! never wraps back to the first frame.
//!
//! The front-end is the single consumer of the event channel. On
//! `ShowFrame` it presents the frame (holding the busy gate while it
//! does); on `Started`/`Stopped` it disables and re-enables its
//! interactive controls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, Receiver, Sender};
use tracing::{debug, info, warn};

use sift_common::{FrameIndex, PlayerConfig, Playhead};

use crate::gate::LoadGate;

// ---------------------------------------------------------------------------
// Player state
// ---------------------------------------------------------------------------

/// Current state of the playback controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlayerState {
    /// Not advancing; the playhead moves only by explicit seeks.
    #[default]
    Stopped,
    /// The worker loop is advancing the playhead.
    Running,
}

impl PlayerState {
    /// Short label for display in a front-end.
    pub fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Running => "Running",
        }
    }
}

// ---------------------------------------------------------------------------
// Player events -- sent from the playback loop to the front-end
// ---------------------------------------------------------------------------

/// Why a run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The playhead reached the last frame.
    Completed,
    /// A stop was requested, or the event receiver went away.
    Cancelled,
}

/// Messages from the playback loop, consumed by the front-end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    /// A run began; interactive controls should be disabled.
    Started { at: FrameIndex },
    /// The playhead advanced; present this frame.
    ShowFrame(FrameIndex),
    /// The run ended; interactive controls can come back.
    Stopped { at: FrameIndex, reason: StopReason },
}

// ---------------------------------------------------------------------------
// Frame player
// ---------------------------------------------------------------------------

/// Cooperative playback controller over a frame stack.
///
/// Advancement runs on a dedicated worker thread so a stop requested from
/// the interactive context is observed promptly between steps. The busy
/// gate is the only synchronization point with the display side; the run
/// flag is the only cancellation mechanism. Stopping never interrupts an
/// in-flight load.
pub struct FramePlayer {
    /// Total frames in the stack; the loop stops at `frame_count - 1`.
    frame_count: usize,
    /// Shared cursor, advanced by the loop and seekable from outside.
    playhead: Playhead,
    /// Busy gate polled before each advance.
    gate: LoadGate,
    /// Cooperative run flag; clearing it stops the loop within a tick.
    run: Arc<AtomicBool>,
    /// Delay between advancement polls.
    tick: Duration,
    /// Event channel to the front-end.
    events_tx: Sender<PlayerEvent>,
    /// Worker handle, joined on shutdown or restart.
    worker: Option<thread::JoinHandle<()>>,
}

impl FramePlayer {
    /// Create a player over `frame_count` frames.
    ///
    /// Returns the player and the event receiver; the receiver is meant
    /// for a single consumer (the front-end's event pump).
    pub fn new(
        frame_count: usize,
        playhead: Playhead,
        config: PlayerConfig,
    ) -> (Self, Receiver<PlayerEvent>) {
        let (events_tx, events_rx) = channel::unbounded();
        let player = Self {
            frame_count,
            playhead,
            gate: LoadGate::new(),
            run: Arc::new(AtomicBool::new(false)),
            tick: config.tick,
            events_tx,
            worker: None,
        };
        (player, events_rx)
    }

    /// The busy gate the display side should hold while presenting.
    pub fn load_gate(&self) -> LoadGate {
        self.gate.clone()
    }

    /// Clone of the shared playhead.
    pub fn playhead(&self) -> Playhead {
        self.playhead.clone()
    }

    /// Poll-based state query.
    pub fn state(&self) -> PlayerState {
        if self.is_running() {
            PlayerState::Running
        } else {
            PlayerState::Stopped
        }
    }

    /// Whether a run is in progress. The flag drops as soon as a stop is
    /// requested; the definitive end of a run is its `Stopped` event.
    pub fn is_running(&self) -> bool {
        self.run.load(Ordering::Relaxed)
    }

    /// Start advancing from the current playhead position.
    ///
    /// No-op while already running. After a completed or cancelled run,
    /// starting again begins a fresh run from wherever the playhead is.
    pub fn start(&mut self) {
        if self.is_running() {
            debug!("Start ignored: already running");
            return;
        }

        // Reap the worker of a run that ended on its own.
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }

        self.run.store(true, Ordering::Relaxed);

        let frame_count = self.frame_count;
        let playhead = self.playhead.clone();
        let gate = self.gate.clone();
        let run = Arc::clone(&self.run);
        let events = self.events_tx.clone();
        let tick = self.tick;

        let spawned = thread::Builder::new()
            .name("sift-player".to_string())
            .spawn(move || {
                playback_loop(frame_count, playhead, gate, run, events, tick);
            });

        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                info!(
                    frames = frame_count,
                    at = %self.playhead.position(),
                    "Playback started"
                );
            }
            Err(e) => {
                self.run.store(false, Ordering::Relaxed);
                warn!(error = %e, "Failed to spawn playback thread");
            }
        }
    }

    /// Request a cooperative stop.
    ///
    /// The loop observes the flag within one tick; an in-flight load is
    /// never interrupted.
    pub fn stop(&self) {
        if self.run.swap(false, Ordering::Relaxed) {
            debug!("Stop requested");
        }
    }

    /// Stop and wait for the worker to wind down.
    pub fn shutdown(&mut self) {
        self.stop();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FramePlayer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for FramePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramePlayer")
            .field("frame_count", &self.frame_count)
            .field("state", &self.state())
            .field("at", &self.playhead.position())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Worker loop
// ---------------------------------------------------------------------------

/// Loop body run on the worker thread.
fn playback_loop(
    frame_count: usize,
    playhead: Playhead,
    gate: LoadGate,
    run: Arc<AtomicBool>,
    events: Sender<PlayerEvent>,
    tick: Duration,
) {
    let last = frame_count.saturating_sub(1);

    let started = events.send(PlayerEvent::Started {
        at: playhead.position(),
    });

    let reason = if started.is_err() {
        StopReason::Cancelled
    } else {
        loop {
            if !run.load(Ordering::Relaxed) {
                break StopReason::Cancelled;
            }
            let at = playhead.position();
            if at.0 >= last {
                break StopReason::Completed;
            }
            if !gate.is_busy() {
                // Load/store advance: a seek landing between the read and
                // the write is last-write-wins, the same as one landing
                // right after.
                let next = at + 1;
                playhead.seek(next);
                if events.send(PlayerEvent::ShowFrame(next)).is_err() {
                    warn!("Event channel disconnected; stopping playback");
                    break StopReason::Cancelled;
                }
            }
            thread::sleep(tick);
        }
    };

    run.store(false, Ordering::Relaxed);
    let at = playhead.position();
    debug!(at = %at, ?reason, "Playback loop exiting");
    let _ = events.send(PlayerEvent::Stopped { at, reason });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_labels() {
        assert_eq!(PlayerState::Stopped.label(), "Stopped");
        assert_eq!(PlayerState::Running.label(), "Running");
    }

    #[test]
    fn new_player_is_stopped() {
        let (player, _events) = FramePlayer::new(5, Playhead::default(), PlayerConfig::default());
        assert_eq!(player.state(), PlayerState::Stopped);
        assert!(!player.is_running());
    }

    #[test]
    fn stop_before_start_is_harmless() {
        let (player, _events) = FramePlayer::new(5, Playhead::default(), PlayerConfig::default());
        player.stop();
        assert_eq!(player.state(), PlayerState::Stopped);
    }

    #[test]
    fn load_gate_is_shared_with_the_player() {
        let (player, _events) = FramePlayer::new(5, Playhead::default(), PlayerConfig::default());
        let gate = player.load_gate();
        let _token = gate.begin();
        assert!(player.load_gate().is_busy());
    }
}
