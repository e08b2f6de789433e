// crates/films-contract/src/events.rs
// ============================================================================
// Module: Contract Events
// Description: Structured JSON-line events for check and run completion.
// Purpose: Emit machine-readable progress without a hard logging dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The verifier reports through an [`EventSink`]. Sinks serialize events as
//! one JSON object per line so any log pipeline can ingest them. Sink
//! failures are swallowed: logging must never change a check outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::check::CheckGroup;
use crate::check::CheckId;
use crate::check::CheckReport;
use crate::report::RunSummary;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Event emitted after each check completes.
#[derive(Debug, Clone, Serialize)]
pub struct CheckEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Check identifier.
    pub check: CheckId,
    /// Check group.
    pub group: CheckGroup,
    /// Whether the check is advisory.
    pub advisory: bool,
    /// Outcome label (`passed`, `failed`, `error`).
    pub outcome: &'static str,
    /// Time spent in the check, in milliseconds.
    pub elapsed_ms: u64,
    /// Failure or error message when the check did not pass.
    pub message: Option<String>,
}

impl CheckEvent {
    /// Builds the event for a finished check.
    #[must_use]
    pub fn new(report: &CheckReport) -> Self {
        Self {
            event: "check_finished",
            timestamp_ms: now_millis(),
            check: report.id,
            group: report.group,
            advisory: report.advisory,
            outcome: report.outcome.label(),
            elapsed_ms: report.elapsed_ms,
            message: report.outcome.message().map(str::to_string),
        }
    }
}

/// Event emitted once a run completes.
#[derive(Debug, Clone, Serialize)]
pub struct RunEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Service root the run targeted.
    pub service_root: String,
    /// Aggregate counts.
    pub summary: RunSummary,
    /// Whether the run is considered successful.
    pub success: bool,
}

impl RunEvent {
    /// Builds the event for a finished run.
    #[must_use]
    pub fn new(service_root: &str, summary: RunSummary, success: bool) -> Self {
        Self {
            event: "run_finished",
            timestamp_ms: now_millis(),
            service_root: service_root.to_string(),
            summary,
            success,
        }
    }
}

/// Milliseconds since the Unix epoch.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Destination for verifier events.
pub trait EventSink: Send + Sync {
    /// Records a finished check.
    fn record_check(&self, event: &CheckEvent);

    /// Records a finished run.
    fn record_run(&self, _event: &RunEvent) {}
}

/// Event sink that logs JSON lines to stderr.
pub struct StderrEventSink;

impl EventSink for StderrEventSink {
    fn record_check(&self, event: &CheckEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_run(&self, event: &RunEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Event sink that appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the event log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Serializes one event as a line.
    fn append<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl EventSink for FileEventSink {
    fn record_check(&self, event: &CheckEvent) {
        self.append(event);
    }

    fn record_run(&self, event: &RunEvent) {
        self.append(event);
    }
}

/// No-op event sink.
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn record_check(&self, _event: &CheckEvent) {}
}
