// crates/films-contract/src/report.rs
// ============================================================================
// Module: Run Reports
// Description: Aggregated pass/fail reports and their text, JSON, and Markdown forms.
// Purpose: Present one outcome per check and decide overall run success.
// Dependencies: serde, serde_jcs
// ============================================================================

//! ## Overview
//! A [`RunReport`] keeps check reports in catalog order. Success ignores
//! failed advisory checks unless the run is strict. Reports render as plain
//! text for terminals, canonical JSON (JCS) for artifacts, and Markdown.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::check::CheckOutcome;
use crate::check::CheckReport;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Aggregate counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Checks executed.
    pub total: usize,
    /// Checks that passed.
    pub passed: usize,
    /// Checks with a failed assertion.
    pub failed: usize,
    /// Checks that could not complete.
    pub errored: usize,
    /// Failed or errored checks that are advisory.
    pub advisory_failures: usize,
}

impl RunSummary {
    /// Tallies a slice of check reports.
    #[must_use]
    pub fn tally(checks: &[CheckReport]) -> Self {
        let mut summary = Self {
            total: checks.len(),
            ..Self::default()
        };
        for check in checks {
            match check.outcome {
                CheckOutcome::Passed => summary.passed += 1,
                CheckOutcome::Failed {
                    ..
                } => summary.failed += 1,
                CheckOutcome::Error {
                    ..
                } => summary.errored += 1,
            }
            if check.advisory && !check.outcome.is_passed() {
                summary.advisory_failures += 1;
            }
        }
        summary
    }
}

/// Result of running a selection of checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Service root the run targeted.
    pub service_root: String,
    /// Whether advisory failures count against success.
    pub strict: bool,
    /// Aggregate counts.
    pub summary: RunSummary,
    /// Per-check reports in catalog order.
    pub checks: Vec<CheckReport>,
}

impl RunReport {
    /// Builds a report and its summary.
    #[must_use]
    pub fn new(service_root: impl Into<String>, strict: bool, checks: Vec<CheckReport>) -> Self {
        Self {
            service_root: service_root.into(),
            strict,
            summary: RunSummary::tally(&checks),
            checks,
        }
    }

    /// Returns true when no check failed, ignoring advisory failures unless strict.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.checks.iter().all(|check| {
            check.outcome.is_passed() || (check.advisory && !self.strict)
        })
    }

    /// Returns the reports that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &CheckReport> {
        self.checks.iter().filter(|check| !check.outcome.is_passed())
    }

    /// Serializes the report as canonical JSON (RFC 8785).
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_jcs::to_vec(self)
    }

    /// Renders a terminal-friendly report.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "films contract run against {}", self.service_root);
        for check in &self.checks {
            let advisory = if check.advisory { " (advisory)" } else { "" };
            let _ = writeln!(
                out,
                "  {:<6} {}{advisory} [{} ms]",
                check.outcome.label(),
                check.id,
                check.elapsed_ms
            );
            if let Some(message) = check.outcome.message() {
                let _ = writeln!(out, "         {message}");
            }
        }
        let _ = writeln!(
            out,
            "{} checks: {} passed, {} failed, {} errors ({} advisory)",
            self.summary.total,
            self.summary.passed,
            self.summary.failed,
            self.summary.errored,
            self.summary.advisory_failures
        );
        let verdict = if self.is_success() { "PASS" } else { "FAIL" };
        let _ = writeln!(out, "result: {verdict}");
        out
    }

    /// Renders a Markdown summary.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Films Contract Summary\n\n");
        out.push_str("## Status\n\n");
        let _ = writeln!(out, "- Service root: {}", self.service_root);
        let _ = writeln!(out, "- Result: {}", if self.is_success() { "pass" } else { "fail" });
        let _ = writeln!(out, "- Strict: {}", self.strict);
        let _ = writeln!(
            out,
            "- Checks: {} total, {} passed, {} failed, {} errors",
            self.summary.total, self.summary.passed, self.summary.failed, self.summary.errored
        );
        out.push_str("\n## Failures\n\n");
        let mut any = false;
        for check in self.failures() {
            any = true;
            let advisory = if check.advisory { " (advisory)" } else { "" };
            let message = check.outcome.message().unwrap_or_default();
            let _ = writeln!(out, "- `{}`{advisory}: {message}", check.id);
        }
        if !any {
            out.push_str("- None\n");
        }
        out
    }

    /// Writes `report.json` and `report.md` into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or files cannot be written.
    pub fn write_artifacts(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let json_path = dir.join("report.json");
        let bytes = self.to_canonical_json().map_err(io::Error::other)?;
        fs::write(&json_path, bytes)?;
        let md_path = dir.join("report.md");
        fs::write(&md_path, self.to_markdown())?;
        Ok(vec![json_path, md_path])
    }
}
