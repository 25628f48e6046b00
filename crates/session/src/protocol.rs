//! Session protocol: append-only log of selection activity.
//!
//! The stacking workflow keeps a human-readable protocol of each run so
//! users can audit what happened to a stack after the fact. This module
//! writes the review slice of that protocol: a timestamped session-start
//! line and, at the detailed level, the lists of frames the user included
//! and excluded.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use sift_common::ProtocolLevel;

use crate::report::ChangeReport;

/// Protocol writer with a verbosity level and an optional sink.
///
/// Without a sink nothing is written; diagnostics still flow through
/// `tracing` from the session itself.
pub struct Protocol {
    level: ProtocolLevel,
    sink: Option<Box<dyn Write + Send>>,
}

impl Protocol {
    /// Protocol with no sink.
    pub fn new(level: ProtocolLevel) -> Self {
        Self { level, sink: None }
    }

    /// Protocol writing to an arbitrary sink.
    pub fn with_sink(level: ProtocolLevel, sink: Box<dyn Write + Send>) -> Self {
        Self {
            level,
            sink: Some(sink),
        }
    }

    /// Protocol appending to the log file at `path` (created if absent).
    pub fn to_file(level: ProtocolLevel, path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing::debug!(path = %path.display(), ?level, "Protocol sink opened");
        Ok(Self::with_sink(level, Box::new(file)))
    }

    /// Configured verbosity.
    pub fn level(&self) -> ProtocolLevel {
        self.level
    }

    /// Record the opening of a review session.
    pub fn session_started(&mut self) -> io::Result<()> {
        if self.level >= ProtocolLevel::Session {
            if let Some(sink) = self.sink.as_mut() {
                writeln!(
                    sink,
                    "{} +++ Start selecting frames +++",
                    current_iso_timestamp()
                )?;
                sink.flush()?;
            }
        }
        Ok(())
    }

    /// Record a committed session. Writes the per-frame lists (1-based
    /// ordinals) and, if the included count changed, the resulting count.
    pub fn session_committed(&mut self, report: &ChangeReport) -> io::Result<()> {
        if self.level < ProtocolLevel::Detailed {
            return Ok(());
        }
        if let Some(sink) = self.sink.as_mut() {
            if !report.included.is_empty() {
                writeln!(
                    sink,
                    "    The user has included the following frames into the stacking workflow: {:?}",
                    report.included_ordinals()
                )?;
            }
            if !report.excluded.is_empty() {
                writeln!(
                    sink,
                    "    The user has excluded the following frames from the stacking workflow: {:?}",
                    report.excluded_ordinals()
                )?;
            }
            if report.remaining != report.previous_included() {
                writeln!(
                    sink,
                    "    {} frames will be used in the stacking workflow.",
                    report.remaining
                )?;
            }
            sink.flush()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Protocol")
            .field("level", &self.level)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

/// Generate a current ISO 8601 timestamp string.
fn current_iso_timestamp() -> String {
    // Simple UTC format without an external date-time dependency.
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let (year, month, day, hour, min, sec) = epoch_to_datetime(dur.as_secs());
    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{min:02}:{sec:02}Z")
}

/// Convert Unix epoch seconds to (year, month, day, hour, minute, second).
/// Accurate for dates from 1970 to ~2099.
fn epoch_to_datetime(epoch: u64) -> (u64, u64, u64, u64, u64, u64) {
    let sec = epoch % 60;
    let min = (epoch / 60) % 60;
    let hour = (epoch / 3600) % 24;
    let mut days = epoch / 86400;

    let mut year = 1970u64;
    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if days < days_in_year {
            break;
        }
        days -= days_in_year;
        year += 1;
    }

    let days_in_months: [u64; 12] = if is_leap_year(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 0u64;
    for (i, &dm) in days_in_months.iter().enumerate() {
        if days < dm {
            month = i as u64 + 1;
            break;
        }
        days -= dm;
    }
    let day = days + 1;

    (year, month, day, hour, min, sec)
}

fn is_leap_year(y: u64) -> bool {
    (y.is_multiple_of(4) && !y.is_multiple_of(100)) || y.is_multiple_of(400)
}
