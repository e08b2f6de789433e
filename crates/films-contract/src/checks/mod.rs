// crates/films-contract/src/checks/mod.rs
// ============================================================================
// Module: Contract Checks
// Description: Check implementations and the shared context they run against.
// Purpose: Map every catalog identifier to one independent request/assert unit.
// Dependencies: reqwest, serde, url
// ============================================================================

//! ## Overview
//! Every check receives a read-only [`CheckContext`] and returns
//! `Result<(), CheckError>`. Assertion failures become
//! [`CheckError::Failed`]; transport failures become [`CheckError::Transport`]
//! and undecodable bodies become [`CheckError::Decode`].
//! Checks share no state and never depend on each other's outcome.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod collection;
mod fields;
mod metadata;
mod methods;
mod not_found;
mod resource;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::check::CheckFailure;
use crate::check::CheckId;
use crate::client::ClientError;
use crate::client::Exchange;
use crate::client::FilmsClient;
use crate::config::ConfigError;
use crate::expectations::COLLECTION_PATH;
use crate::formats::FormatRules;
use crate::model::ReferenceCategory;

// ============================================================================
// SECTION: Endpoints
// ============================================================================

/// URLs derived from the configured service root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Service root, always ending in `/`.
    root: Url,
    /// Films collection URL.
    collection: Url,
}

impl Endpoints {
    /// Derives endpoints from a validated service root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the collection URL cannot be joined.
    pub fn new(root: Url) -> Result<Self, ConfigError> {
        let collection = root
            .join(COLLECTION_PATH)
            .map_err(|err| ConfigError::Invalid(format!("collection url: {err}")))?;
        Ok(Self {
            root,
            collection,
        })
    }

    /// Returns the service root.
    #[must_use]
    pub const fn root(&self) -> &Url {
        &self.root
    }

    /// Returns the films collection URL.
    #[must_use]
    pub const fn collection(&self) -> &Url {
        &self.collection
    }

    /// Returns the URL of one film, `<collection><id>/`.
    ///
    /// # Errors
    ///
    /// Returns the join error when `id` does not form a valid path segment.
    pub fn film(&self, id: &str) -> Result<Url, url::ParseError> {
        self.collection.join(&format!("{id}/"))
    }

    /// Returns the prefix every reference URL of `category` must start with.
    ///
    /// # Errors
    ///
    /// Returns the join error when the category path cannot be joined.
    pub fn reference_prefix(&self, category: ReferenceCategory) -> Result<Url, url::ParseError> {
        self.root.join(category.resource_path())
    }
}

// ============================================================================
// SECTION: Context
// ============================================================================

/// Read-only state shared by every check.
#[derive(Debug, Clone)]
pub struct CheckContext {
    /// HTTP client.
    pub client: FilmsClient,
    /// Derived endpoint URLs.
    pub endpoints: Endpoints,
    /// Compiled format rules.
    pub rules: FormatRules,
    /// Round-trip budget for the latency check.
    pub latency_budget: Duration,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Reasons a check did not pass.
#[derive(Debug)]
pub enum CheckError {
    /// An assertion failed.
    Failed(CheckFailure),
    /// The request could not complete.
    Transport(String),
    /// The response body did not decode into the expected shape.
    Decode(String),
}

impl From<CheckFailure> for CheckError {
    fn from(failure: CheckFailure) -> Self {
        Self::Failed(failure)
    }
}

impl From<ClientError> for CheckError {
    fn from(err: ClientError) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<url::ParseError> for CheckError {
    fn from(err: url::ParseError) -> Self {
        Self::Transport(format!("invalid request url: {err}"))
    }
}

/// Result alias for check bodies.
pub type CheckResult = Result<(), CheckError>;

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Runs the check named by `id`.
///
/// # Errors
///
/// Returns [`CheckError`] when an assertion fails or the transport fails.
pub fn execute(ctx: &CheckContext, id: CheckId) -> CheckResult {
    match id {
        CheckId::Collection => collection::check_collection(ctx),
        CheckId::HeadHeaders => metadata::check_head_headers(ctx),
        CheckId::OptionsMediaTypes => metadata::check_options_media_types(ctx),
        CheckId::Field(field) => fields::check_field(ctx, field),
        CheckId::FilmStatus => resource::check_status(ctx),
        CheckId::FilmDetails => resource::check_details(ctx),
        CheckId::FilmReferences => resource::check_references(ctx),
        CheckId::FilmDates => resource::check_dates(ctx),
        CheckId::FilmLatency => resource::check_latency(ctx),
        CheckId::FilmRepeatable => resource::check_repeatable(ctx),
        CheckId::MethodNotAllowed(method) => methods::check_method_not_allowed(ctx, method),
        CheckId::NotFound(missing) => not_found::check_not_found(ctx, missing),
    }
}

// ============================================================================
// SECTION: Assertion Helpers
// ============================================================================

/// Fails unless `condition` holds.
pub(crate) fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), CheckFailure> {
    if condition { Ok(()) } else { Err(CheckFailure::new(message())) }
}

/// Fails unless `observed == expected`.
pub(crate) fn ensure_eq<T>(subject: &str, expected: &T, observed: &T) -> Result<(), CheckFailure>
where
    T: PartialEq + fmt::Display + ?Sized,
{
    if expected == observed {
        Ok(())
    } else {
        Err(CheckFailure::mismatch(subject, expected, observed))
    }
}

/// Fails unless the exchange carries the expected status.
pub(crate) fn expect_status(exchange: &Exchange, expected: StatusCode) -> Result<(), CheckFailure> {
    if exchange.status == expected {
        return Ok(());
    }
    Err(CheckFailure::mismatch(
        format!("{} {} status", exchange.method, exchange.url),
        expected.as_u16(),
        exchange.status_code(),
    ))
}

/// Decodes a JSON body, reporting the shape expected on failure.
pub(crate) fn decode_body<T: DeserializeOwned>(
    exchange: &Exchange,
    shape: &str,
) -> Result<T, CheckError> {
    exchange.json().map_err(|err| {
        CheckError::Decode(format!(
            "{} {} body is not {shape}: {err}; body starts with `{}`",
            exchange.method,
            exchange.url,
            exchange.body_preview()
        ))
    })
}

/// Labels a film record for failure messages: `film #2 ("The Empire Strikes Back")`.
pub(crate) fn film_label(index: usize, record: &serde_json::Map<String, Value>) -> String {
    match record.get("title").and_then(Value::as_str) {
        Some(title) => format!("film #{index} (\"{title}\")"),
        None => format!("film #{index}"),
    }
}

/// Names the JSON type of a value for failure messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(number) if number.is_i64() || number.is_u64() => "an integer",
        Value::Number(_) => "a float",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
