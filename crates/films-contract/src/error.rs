// crates/films-contract/src/error.rs
// ============================================================================
// Module: Contract Errors
// Description: Errors raised while constructing the contract verifier.
// Purpose: Unify config, client, and format-rule failures behind one type.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`ContractError`] covers verifier construction only. Once a verifier
//! exists every problem is reported per check.

use thiserror::Error;

use crate::client::ClientError;
use crate::config::ConfigError;
use crate::formats::FormatError;

/// Errors constructing a [`crate::ContractVerifier`].
///
/// Check failures are never reported through this type; they land in
/// [`crate::CheckOutcome`].
#[derive(Debug, Error)]
pub enum ContractError {
    /// Configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The HTTP client could not be built.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// A format pattern failed to compile.
    #[error(transparent)]
    Format(#[from] FormatError),
}
