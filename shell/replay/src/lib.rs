//! Shell Replay - Deterministic Script Playback
//!
//! Plays a JSON-lines script of timestamped [`SurfaceEvent`]s against a
//! [`Shell`] mounted on [`HeadlessSignals`], and records a snapshot after
//! mount, after every event and after every autoplay tick.
//!
//! # Script Format
//!
//! ```text
//! {"at_ms": 0,    "event": {"type": "resized", "width": 500}}
//! {"at_ms": 120,  "event": {"type": "hamburger_tapped"}}
//! {"at_ms": 3500, "event": {"type": "tab_selected", "index": 2}}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Timestamps must not
//! decrease.
//!
//! # Virtual Clock
//!
//! Time is virtual: `at_ms` is an offset from the mount instant. Before each
//! event, every autoplay deadline that falls at or before the event time is
//! fired in order, so the output is identical on every run.

use std::io::BufRead;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use shell_core::{
    HeadlessSignals, MountMode, Shell, ShellConfig, ShellSnapshot, SiteContent, SurfaceEvent,
};

/// Errors reading a replay script
#[derive(Debug, Error)]
pub enum ReplayError {
    /// A line was not a valid script step
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// A timestamp went backwards
    #[error("line {line}: at_ms {at_ms} is earlier than previous step at {previous}")]
    OutOfOrder {
        /// 1-based line number
        line: usize,
        /// Offending timestamp
        at_ms: u64,
        /// Timestamp of the step before it
        previous: u64,
    },

    /// Reading the script failed
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

/// One scripted event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Milliseconds after mount
    pub at_ms: u64,
    /// Event delivered to the shell
    pub event: SurfaceEvent,
}

/// Parse a JSON-lines script
///
/// # Errors
///
/// Returns [`ReplayError`] on I/O failure, malformed lines, or timestamps
/// that go backwards.
pub fn parse_script<R: BufRead>(reader: R) -> Result<Vec<ScriptStep>, ReplayError> {
    let mut steps: Vec<ScriptStep> = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let step: ScriptStep = serde_json::from_str(trimmed).map_err(|source| {
            ReplayError::Parse {
                line: line_no,
                source,
            }
        })?;
        if let Some(previous) = steps.last().map(|s| s.at_ms) {
            if step.at_ms < previous {
                return Err(ReplayError::OutOfOrder {
                    line: line_no,
                    at_ms: step.at_ms,
                    previous,
                });
            }
        }
        steps.push(step);
    }
    debug!(steps = steps.len(), "Parsed replay script");
    Ok(steps)
}

/// What produced a record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Initial mount
    Mount,
    /// Autoplay tick
    Timer,
    /// Scripted event, by name
    Event(String),
    /// Final teardown
    Unmount,
}

/// One output line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayRecord {
    /// Virtual milliseconds after mount
    pub at_ms: u64,
    /// What produced this record
    pub trigger: Trigger,
    /// Shell state after the trigger
    pub snapshot: ShellSnapshot,
    /// Error returned by the shell, if the event was rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Environment the script runs in
#[derive(Clone, Debug)]
pub struct ReplayOptions {
    /// Viewport width reported at mount; `None` simulates a missing window
    pub width: Option<u32>,
    /// Scroll offset reported at mount
    pub offset: f64,
    /// Keep firing autoplay ticks until this time after the last event
    pub until_ms: Option<u64>,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            width: Some(1280),
            offset: 0.0,
            until_ms: None,
        }
    }
}

/// A mounted shell on a virtual clock
pub struct Replay {
    shell: Shell,
    source: HeadlessSignals,
    origin: Instant,
    options: ReplayOptions,
    records: Vec<ReplayRecord>,
}

impl Replay {
    /// Build a shell and mount it at virtual time 0
    #[must_use]
    pub fn new(config: ShellConfig, content: SiteContent, options: ReplayOptions) -> Self {
        let mut source = match options.width {
            Some(width) => HeadlessSignals::new(width).with_offset(options.offset),
            None => HeadlessSignals::windowless(),
        };
        let origin = Instant::now();
        let mut shell = Shell::new(config, content);
        let mode = shell.mount(&mut source, origin);
        if mode == MountMode::Static {
            warn!("Replay running against the static fallback");
        }

        let mut replay = Self {
            shell,
            source,
            origin,
            options,
            records: Vec::new(),
        };
        replay.record(0, Trigger::Mount, None);
        replay
    }

    fn record(&mut self, at_ms: u64, trigger: Trigger, error: Option<String>) {
        self.records.push(ReplayRecord {
            at_ms,
            trigger,
            snapshot: self.shell.snapshot(),
            error,
        });
    }

    fn at(&self, ms: u64) -> Instant {
        self.origin + Duration::from_millis(ms)
    }

    fn ms_since_origin(&self, instant: Instant) -> u64 {
        u64::try_from(instant.duration_since(self.origin).as_millis()).unwrap_or(u64::MAX)
    }

    /// Fire every autoplay deadline at or before `until_ms`
    fn run_timers(&mut self, until_ms: u64) {
        let until = self.at(until_ms);
        while let Some(deadline) = self.shell.next_deadline() {
            if deadline > until {
                break;
            }
            if self.shell.poll_timers(deadline) {
                let at_ms = self.ms_since_origin(deadline);
                self.record(at_ms, Trigger::Timer, None);
            } else if self.shell.next_deadline() == Some(deadline) {
                break;
            }
        }
    }

    /// Apply one step, firing due timers first
    pub fn step(&mut self, step: &ScriptStep) {
        self.run_timers(step.at_ms);

        if let SurfaceEvent::Resized { width } = step.event {
            self.source.set_width(width);
        }
        let now = self.at(step.at_ms);
        let error = match self.shell.handle_event(&step.event, now) {
            Ok(()) => None,
            Err(e) => {
                warn!(at_ms = step.at_ms, event = step.event.name(), error = %e, "Event rejected");
                Some(e.to_string())
            }
        };
        self.record(step.at_ms, Trigger::Event(step.event.name().to_string()), error);
    }

    /// Play a whole script, unmount, and return every record
    pub fn run(mut self, steps: &[ScriptStep]) -> Vec<ReplayRecord> {
        for step in steps {
            self.step(step);
        }

        let last = steps.last().map_or(0, |s| s.at_ms);
        let end = self.options.until_ms.map_or(last, |until| until.max(last));
        self.run_timers(end);

        self.shell.unmount(&mut self.source);
        self.record(end, Trigger::Unmount, None);
        info!(
            steps = steps.len(),
            records = self.records.len(),
            listeners = self.source.listener_count(),
            "Replay finished"
        );
        self.records
    }
}
