// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for live system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: films-contract
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed. The resulting
//! [`SystemTestConfig`] produces the [`ContractConfig`] each live test runs with.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use films_contract::ContractConfig;
use films_contract::config::read_env_strict;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional run root override.
    RunRoot,
    /// Optional service root override.
    ServiceRoot,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Assert advisory checks too (`true`/`false` or `1`/`0`).
    Strict,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunRoot => "FILMS_CONTRACT_SYSTEM_TEST_RUN_ROOT",
            Self::ServiceRoot => "FILMS_CONTRACT_SYSTEM_TEST_SERVICE_ROOT",
            Self::TimeoutSeconds => "FILMS_CONTRACT_SYSTEM_TEST_TIMEOUT_SEC",
            Self::Strict => "FILMS_CONTRACT_SYSTEM_TEST_STRICT",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Optional service root override.
    pub service_root: Option<String>,
    /// Optional per-request timeout override.
    pub timeout: Option<Duration>,
    /// Assert advisory checks as well as required ones.
    pub strict: bool,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid timeout or boolean value).
    pub fn load() -> Result<Self, String> {
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        let service_root = read_env_nonempty(SystemTestEnv::ServiceRoot.as_str())?;
        let timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let strict = parse_bool_env(
            SystemTestEnv::Strict.as_str(),
            read_env_nonempty(SystemTestEnv::Strict.as_str())?,
        )?;
        Ok(Self {
            run_root,
            service_root,
            timeout,
            strict,
        })
    }

    /// Builds the verifier configuration for a live run.
    ///
    /// # Errors
    ///
    /// Returns an error when the resulting configuration is invalid.
    pub fn contract_config(&self) -> Result<ContractConfig, String> {
        let mut config = ContractConfig::default();
        if let Some(root) = &self.service_root {
            config.service_root = root.trim().to_string();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        }
        config.strict = self.strict;
        config.validate().map_err(|err| err.to_string())?;
        Ok(config)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is not UTF-8 or is set but empty.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name).map_err(|err| err.to_string())? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is non-numeric or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a boolean environment variable, defaulting to `false` when unset.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, String> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
