// crates/films-contract/src/config.rs
// ============================================================================
// Module: Contract Configuration
// Description: Configuration loading and validation for the films contract suite.
// Purpose: Provide strict, fail-closed config parsing with env overrides.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment overrides. Callers (the CLI) apply flag overrides last and
//! re-run [`ContractConfig::validate`]. Empty or non-UTF-8 environment values
//! and unknown file keys fail closed instead of being silently ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default service root of the public films API.
pub const DEFAULT_SERVICE_ROOT: &str = "https://swapi.dev/api/";
/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default round-trip budget for the latency check in milliseconds.
pub const DEFAULT_LATENCY_BUDGET_MS: u64 = 500;
/// Default cap on response body size, in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Upper bound for concurrently running checks.
pub const MAX_PARALLEL_CHECKS: usize = 32;
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;

// ============================================================================
// SECTION: Environment Keys
// ============================================================================

/// Environment keys recognized by [`ContractConfig::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractEnv {
    /// Optional config file path.
    ConfigPath,
    /// Service root override.
    ServiceRoot,
    /// Per-request timeout override in milliseconds (positive integer).
    TimeoutMs,
    /// Latency budget override in milliseconds (positive integer).
    LatencyBudgetMs,
    /// Worker count override (positive integer).
    MaxParallel,
    /// Strict mode toggle (`true`/`false` or `1`/`0`).
    Strict,
}

impl ContractEnv {
    /// Every recognized key, in documentation order.
    pub const ALL: [Self; 6] = [
        Self::ConfigPath,
        Self::ServiceRoot,
        Self::TimeoutMs,
        Self::LatencyBudgetMs,
        Self::MaxParallel,
        Self::Strict,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigPath => "FILMS_CONTRACT_CONFIG",
            Self::ServiceRoot => "FILMS_CONTRACT_SERVICE_ROOT",
            Self::TimeoutMs => "FILMS_CONTRACT_TIMEOUT_MS",
            Self::LatencyBudgetMs => "FILMS_CONTRACT_LATENCY_BUDGET_MS",
            Self::MaxParallel => "FILMS_CONTRACT_MAX_PARALLEL",
            Self::Strict => "FILMS_CONTRACT_STRICT",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Runtime configuration for the contract verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractConfig {
    /// Service root; the films collection lives at `<service_root>films/`.
    pub service_root: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Round-trip budget enforced by the latency check, in milliseconds.
    pub latency_budget_ms: u64,
    /// Maximum response body size, in bytes.
    pub max_response_bytes: usize,
    /// Number of checks allowed to run at once (1 runs sequentially).
    pub max_parallel: usize,
    /// Treat advisory check failures as run failures.
    pub strict: bool,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            service_root: DEFAULT_SERVICE_ROOT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            latency_budget_ms: DEFAULT_LATENCY_BUDGET_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            max_parallel: 1,
            strict: false,
            user_agent: concat!("films-contract/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ContractConfig {
    /// Loads configuration from an optional file plus environment overrides.
    ///
    /// The file path is taken from `path`, then from `FILMS_CONTRACT_CONFIG`;
    /// with neither set the defaults are used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, an
    /// environment value is malformed, or the merged configuration is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match resolve_path(path)? {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML configuration file without applying env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized, not
    /// UTF-8, or not valid TOML for this schema.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies environment overrides on top of the current values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when an override is empty, not UTF-8,
    /// or not parseable.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(root) = read_env_nonempty(ContractEnv::ServiceRoot.as_str())? {
            self.service_root = root.trim().to_string();
        }
        if let Some(raw) = read_env_nonempty(ContractEnv::TimeoutMs.as_str())? {
            self.timeout_ms = parse_positive(ContractEnv::TimeoutMs.as_str(), &raw)?;
        }
        if let Some(raw) = read_env_nonempty(ContractEnv::LatencyBudgetMs.as_str())? {
            self.latency_budget_ms = parse_positive(ContractEnv::LatencyBudgetMs.as_str(), &raw)?;
        }
        if let Some(raw) = read_env_nonempty(ContractEnv::MaxParallel.as_str())? {
            self.max_parallel = parse_positive(ContractEnv::MaxParallel.as_str(), &raw)?;
        }
        if let Some(raw) = read_env_nonempty(ContractEnv::Strict.as_str())? {
            self.strict = parse_bool(ContractEnv::Strict.as_str(), &raw)?;
        }
        Ok(())
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when any field is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service_root_url()?;
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be greater than zero".to_string()));
        }
        if self.latency_budget_ms == 0 {
            return Err(ConfigError::Invalid(
                "latency_budget_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_response_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_response_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_parallel == 0 || self.max_parallel > MAX_PARALLEL_CHECKS {
            return Err(ConfigError::Invalid(format!(
                "max_parallel must be between 1 and {MAX_PARALLEL_CHECKS}"
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user_agent must not be empty".to_string()));
        }
        Ok(())
    }

    /// Parses and validates the service root URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] unless the root is an absolute
    /// `http`/`https` URL ending in `/` without query or fragment.
    pub fn service_root_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.service_root)
            .map_err(|err| ConfigError::Invalid(format!("service_root is not a url: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid("service_root must use http or https".to_string()));
        }
        if url.host_str().is_none() {
            return Err(ConfigError::Invalid("service_root must include a host".to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::Invalid(
                "service_root must not carry a query or fragment".to_string(),
            ));
        }
        if !url.path().ends_with('/') {
            return Err(ConfigError::Invalid("service_root must end with '/'".to_string()));
        }
        Ok(url)
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the latency budget for the round-trip check.
    #[must_use]
    pub const fn latency_budget(&self) -> Duration {
        Duration::from_millis(self.latency_budget_ms)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or the environment.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    Ok(read_env_nonempty(ContractEnv::ConfigPath.as_str())?.map(PathBuf::from))
}

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{name} must be valid UTF-8")))
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(ConfigError::Invalid(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive integer from an environment value.
fn parse_positive<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let value: T = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{name} must be a positive integer")))?;
    if value == T::default() {
        return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
    }
    Ok(value)
}

/// Parses a boolean literal from an environment value.
fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(ConfigError::Invalid(format!("{name} must be 1, 0, true, or false")))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
