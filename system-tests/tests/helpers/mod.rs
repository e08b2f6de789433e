// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for live films contract system-tests.
// Purpose: Provide the live verifier and artifact utilities.
// Dependencies: system-tests, films-contract
// ============================================================================

//! ## Overview
//! Shared helpers for live films contract system-tests.
//! Invariants:
//! - Every test writes `summary.json` and `summary.md`, even on panic.
//! - Advisory checks are asserted only when strict mode is enabled.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod live;
