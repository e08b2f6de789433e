// crates/films-contract/src/lib.rs
// ============================================================================
// Module: Films Contract Library
// Description: Behavioral contract checks for the films REST resource.
// Purpose: Verify a live films API against its published contract.
// Dependencies: regex, reqwest, serde, serde_jcs, serde_json, thiserror, time, toml, url
// ============================================================================

//! ## Overview
//! The films contract is a catalog of independent checks, each issuing real
//! HTTP requests against `<service_root>films/` and asserting status codes,
//! headers, body shapes, field formats, and literal values.
//! [`ContractVerifier`] runs a [`Selection`] of the catalog and returns a
//! [`RunReport`] with exactly one outcome per check.
//! Invariants:
//! - Checks share no state; one failing check never stops another.
//! - Reports list checks in catalog order regardless of parallelism.
//! - Advisory checks only fail strict runs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod check;
pub mod checks;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod expectations;
pub mod formats;
pub mod model;
pub mod report;
pub mod runner;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use check::CatalogError;
pub use check::CheckFailure;
pub use check::CheckGroup;
pub use check::CheckId;
pub use check::CheckOutcome;
pub use check::CheckReport;
pub use check::MissingFilm;
pub use check::RestrictedMethod;
pub use check::Selection;
pub use checks::Endpoints;
pub use client::ClientError;
pub use client::Exchange;
pub use client::FilmsClient;
pub use config::ConfigError;
pub use config::ContractConfig;
pub use config::ContractEnv;
pub use error::ContractError;
pub use events::CheckEvent;
pub use events::EventSink;
pub use events::FileEventSink;
pub use events::NoopEventSink;
pub use events::RunEvent;
pub use events::StderrEventSink;
pub use formats::FormatError;
pub use formats::FormatRules;
pub use model::FilmField;
pub use model::ReferenceCategory;
pub use report::RunReport;
pub use report::RunSummary;
pub use runner::ContractVerifier;
