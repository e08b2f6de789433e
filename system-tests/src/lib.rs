// system-tests/src/lib.rs
// ============================================================================
// Module: Films Contract System Tests Library
// Description: Shared configuration for live contract system tests.
// Purpose: Provide common utilities for the system-test binaries.
// Dependencies: films-contract
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the live system-test
//! binaries in `system-tests/tests`. Those binaries call the real films API
//! and only build with the `system-tests` feature.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
