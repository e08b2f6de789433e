// crates/films-contract/src/formats.rs
// ============================================================================
// Module: Field Format Rules
// Description: Pattern and calendar rules for film date and timestamp fields.
// Purpose: Compile format patterns once and share them across checks.
// Dependencies: regex, thiserror, time
// ============================================================================

//! ## Overview
//! `release_date` must match [`DATE_PATTERN`] and name a real calendar day;
//! `created` and `edited` must match [`TIMESTAMP_PATTERN`]. Patterns are
//! compiled once when the verifier is built.

// ============================================================================
// SECTION: Imports
// ============================================================================

use regex::Regex;
use thiserror::Error;
use time::Date;
use time::macros::format_description;

// ============================================================================
// SECTION: Patterns
// ============================================================================

/// Pattern every `release_date` must match.
pub const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";
/// Pattern every `created`/`edited` timestamp must match.
pub const TIMESTAMP_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,6}Z$";

/// Errors compiling the format rules.
#[derive(Debug, Error)]
#[error("compile format pattern `{pattern}` failed: {message}")]
pub struct FormatError {
    /// Pattern source that failed to compile.
    pub pattern: &'static str,
    /// Compiler diagnostic.
    pub message: String,
}

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Compiled date and timestamp rules.
#[derive(Debug, Clone)]
pub struct FormatRules {
    /// Compiled [`DATE_PATTERN`].
    date: Regex,
    /// Compiled [`TIMESTAMP_PATTERN`].
    timestamp: Regex,
}

impl FormatRules {
    /// Compiles the rules.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] when a pattern fails to compile.
    pub fn new() -> Result<Self, FormatError> {
        Ok(Self {
            date: compile(DATE_PATTERN)?,
            timestamp: compile(TIMESTAMP_PATTERN)?,
        })
    }

    /// Returns true when `value` has the `YYYY-MM-DD` shape.
    #[must_use]
    pub fn matches_date(&self, value: &str) -> bool {
        self.date.is_match(value)
    }

    /// Returns true when `value` has the `YYYY-MM-DD` shape and names a real day.
    #[must_use]
    pub fn is_calendar_date(&self, value: &str) -> bool {
        self.matches_date(value)
            && Date::parse(value, format_description!("[year]-[month]-[day]")).is_ok()
    }

    /// Returns true when `value` is a fractional-second UTC timestamp.
    #[must_use]
    pub fn matches_timestamp(&self, value: &str) -> bool {
        self.timestamp.is_match(value)
    }
}

/// Compiles one pattern.
fn compile(pattern: &'static str) -> Result<Regex, FormatError> {
    Regex::new(pattern).map_err(|err| FormatError {
        pattern,
        message: err.to_string(),
    })
}
