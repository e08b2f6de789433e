// crates/films-contract/src/check.rs
// ============================================================================
// Module: Check Catalog
// Description: Identifiers, groups, outcomes, and selection for contract checks.
// Purpose: Give every check a stable name usable by the CLI, reports, and logs.
// Dependencies: reqwest, serde, thiserror
// ============================================================================

//! ## Overview
//! [`CheckId`] enumerates every contract check in catalog order. Identifiers
//! round-trip through [`std::fmt::Display`] and [`std::str::FromStr`]
//! (`collection`, `field:title`, `method-not-allowed:post`, `not-found:-1`).
//! A [`CheckReport`] pairs an identifier with its [`CheckOutcome`].
//! Invariants:
//! - [`CheckId::catalog`] order is stable and is the report order.
//! - Identifiers are unique across the catalog.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::Serializer;
use thiserror::Error;

use crate::model::FilmField;

// ============================================================================
// SECTION: Groups
// ============================================================================

/// Behavioral group a check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckGroup {
    /// Collection fetch.
    Collection,
    /// `HEAD` and `OPTIONS` probes.
    Metadata,
    /// Per-field type and format checks.
    Fields,
    /// Single-resource deep checks.
    Resource,
    /// Write methods rejected on the collection.
    Methods,
    /// Missing resources.
    NotFound,
}

impl CheckGroup {
    /// Every group in catalog order.
    pub const ALL: [Self; 6] = [
        Self::Collection,
        Self::Metadata,
        Self::Fields,
        Self::Resource,
        Self::Methods,
        Self::NotFound,
    ];

    /// Returns the stable group name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Metadata => "metadata",
            Self::Fields => "fields",
            Self::Resource => "resource",
            Self::Methods => "methods",
            Self::NotFound => "not-found",
        }
    }
}

impl fmt::Display for CheckGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckGroup {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == value)
            .ok_or_else(|| CatalogError::UnknownGroup(value.to_string()))
    }
}

// ============================================================================
// SECTION: Check Parameters
// ============================================================================

/// Write methods the collection must reject with `405`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RestrictedMethod {
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl RestrictedMethod {
    /// Every restricted method.
    pub const ALL: [Self; 4] = [Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Patch => Method::PATCH,
            Self::Delete => Method::DELETE,
        }
    }

    /// Returns the lowercase identifier suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

/// Film ids that must not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MissingFilm {
    /// A specific id absent from the catalog.
    Seven,
    /// An id far beyond the catalog.
    NineHundredNinetyNine,
    /// A negative id.
    MinusOne,
}

impl MissingFilm {
    /// Every missing id.
    pub const ALL: [Self; 3] = [Self::Seven, Self::NineHundredNinetyNine, Self::MinusOne];

    /// Returns the id as used in the resource path.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Seven => "7",
            Self::NineHundredNinetyNine => "999",
            Self::MinusOne => "-1",
        }
    }
}

// ============================================================================
// SECTION: Check Identifiers
// ============================================================================

/// Identifier of one contract check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CheckId {
    /// `GET` collection: status, envelope, required fields.
    Collection,
    /// `HEAD` collection: status and header presence.
    HeadHeaders,
    /// `OPTIONS` collection: advertised media types.
    OptionsMediaTypes,
    /// One field's type and format across every collection film.
    Field(FilmField),
    /// `GET films/1/` status.
    FilmStatus,
    /// `GET films/1/` scalar values.
    FilmDetails,
    /// `GET films/1/` reference URL prefixes.
    FilmReferences,
    /// `GET films/1/` date values.
    FilmDates,
    /// `GET films/1/` round-trip latency.
    FilmLatency,
    /// Two `GET films/1/` calls agree on identity fields.
    FilmRepeatable,
    /// A write method on the collection returns `405`.
    MethodNotAllowed(RestrictedMethod),
    /// A missing film returns `404` with the not-found envelope.
    NotFound(MissingFilm),
}

impl CheckId {
    /// Returns every check in catalog order.
    #[must_use]
    pub fn catalog() -> Vec<Self> {
        let mut ids = vec![Self::Collection, Self::HeadHeaders, Self::OptionsMediaTypes];
        ids.extend(FilmField::ALL.into_iter().map(Self::Field));
        ids.extend([
            Self::FilmStatus,
            Self::FilmDetails,
            Self::FilmReferences,
            Self::FilmDates,
            Self::FilmLatency,
            Self::FilmRepeatable,
        ]);
        ids.extend(RestrictedMethod::ALL.into_iter().map(Self::MethodNotAllowed));
        ids.extend(MissingFilm::ALL.into_iter().map(Self::NotFound));
        ids
    }

    /// Returns the group this check belongs to.
    #[must_use]
    pub const fn group(self) -> CheckGroup {
        match self {
            Self::Collection => CheckGroup::Collection,
            Self::HeadHeaders | Self::OptionsMediaTypes => CheckGroup::Metadata,
            Self::Field(_) => CheckGroup::Fields,
            Self::FilmStatus
            | Self::FilmDetails
            | Self::FilmReferences
            | Self::FilmDates
            | Self::FilmLatency
            | Self::FilmRepeatable => CheckGroup::Resource,
            Self::MethodNotAllowed(_) => CheckGroup::Methods,
            Self::NotFound(_) => CheckGroup::NotFound,
        }
    }

    /// Returns true for checks tied to mutable properties of the service.
    ///
    /// Advisory failures are reported but only fail strict runs.
    #[must_use]
    pub const fn is_advisory(self) -> bool {
        matches!(self, Self::HeadHeaders | Self::FilmLatency)
    }

    /// One-line description for listings.
    #[must_use]
    pub fn description(self) -> String {
        match self {
            Self::Collection => "GET films/ returns 200 and every film has all fields".to_string(),
            Self::HeadHeaders => "HEAD films/ returns 200 with the expected headers".to_string(),
            Self::OptionsMediaTypes => {
                "OPTIONS films/ advertises the expected media types".to_string()
            }
            Self::Field(field) => {
                format!("every film's `{field}` is {}", field.kind().describe())
            }
            Self::FilmStatus => "GET films/1/ returns 200".to_string(),
            Self::FilmDetails => "films/1/ has the expected title, crew, and url".to_string(),
            Self::FilmReferences => {
                "films/1/ reference urls carry their category prefixes".to_string()
            }
            Self::FilmDates => "films/1/ has the expected release and audit dates".to_string(),
            Self::FilmLatency => "GET films/1/ completes within the latency budget".to_string(),
            Self::FilmRepeatable => "repeated GET films/1/ returns identical values".to_string(),
            Self::MethodNotAllowed(method) => {
                format!("{} films/ returns 405", method.method())
            }
            Self::NotFound(missing) => {
                format!("GET films/{}/ returns 404 with the not-found detail", missing.id())
            }
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection => f.write_str("collection"),
            Self::HeadHeaders => f.write_str("head-headers"),
            Self::OptionsMediaTypes => f.write_str("options-media-types"),
            Self::Field(field) => write!(f, "field:{field}"),
            Self::FilmStatus => f.write_str("film-1-status"),
            Self::FilmDetails => f.write_str("film-1-details"),
            Self::FilmReferences => f.write_str("film-1-references"),
            Self::FilmDates => f.write_str("film-1-dates"),
            Self::FilmLatency => f.write_str("film-1-latency"),
            Self::FilmRepeatable => f.write_str("film-1-repeatable"),
            Self::MethodNotAllowed(method) => write!(f, "method-not-allowed:{}", method.as_str()),
            Self::NotFound(missing) => write!(f, "not-found:{}", missing.id()),
        }
    }
}

impl FromStr for CheckId {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::catalog()
            .into_iter()
            .find(|id| id.to_string() == value)
            .ok_or_else(|| CatalogError::UnknownCheck(value.to_string()))
    }
}

impl Serialize for CheckId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Errors resolving check or group names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No check has this identifier.
    #[error("unknown check: {0}")]
    UnknownCheck(String),
    /// No group has this name.
    #[error("unknown check group: {0}")]
    UnknownGroup(String),
}

// ============================================================================
// SECTION: Selection
// ============================================================================

/// Subset of the catalog to run.
///
/// An empty selection means every check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Explicitly named checks.
    pub checks: Vec<CheckId>,
    /// Whole groups.
    pub groups: Vec<CheckGroup>,
}

impl Selection {
    /// Selects every check.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Resolves the selection to checks in catalog order without duplicates.
    #[must_use]
    pub fn resolve(&self) -> Vec<CheckId> {
        let catalog = CheckId::catalog();
        if self.checks.is_empty() && self.groups.is_empty() {
            return catalog;
        }
        catalog
            .into_iter()
            .filter(|id| self.checks.contains(id) || self.groups.contains(&id.group()))
            .collect()
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Assertion failure raised by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct CheckFailure {
    /// Human-readable description, including expected and observed values.
    pub message: String,
    /// Expected value, when the assertion compared values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Observed value, when the assertion compared values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<String>,
}

impl CheckFailure {
    /// Creates a failure with a free-form message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            observed: None,
        }
    }

    /// Creates a failure comparing an expected and an observed value.
    #[must_use]
    pub fn mismatch(
        subject: impl fmt::Display,
        expected: impl fmt::Display,
        observed: impl fmt::Display,
    ) -> Self {
        let expected = expected.to_string();
        let observed = observed.to_string();
        Self {
            message: format!("{subject}: expected {expected}, observed {observed}"),
            expected: Some(expected),
            observed: Some(observed),
        }
    }
}

/// Result of running one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Every assertion held.
    Passed,
    /// An assertion failed.
    Failed {
        /// The failed assertion.
        failure: CheckFailure,
    },
    /// The check could not complete (transport or decode failure).
    Error {
        /// Underlying error message.
        message: String,
    },
}

impl CheckOutcome {
    /// Returns the stable outcome label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed {
                ..
            } => "failed",
            Self::Error {
                ..
            } => "error",
        }
    }

    /// Returns true when the check passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns the failure or error message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Failed {
                failure,
            } => Some(&failure.message),
            Self::Error {
                message,
            } => Some(message),
        }
    }
}

/// Report for one executed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Check identifier.
    pub id: CheckId,
    /// Check group.
    pub group: CheckGroup,
    /// Whether the check is advisory.
    pub advisory: bool,
    /// Outcome.
    pub outcome: CheckOutcome,
    /// Wall-clock time spent in the check, in milliseconds.
    pub elapsed_ms: u64,
}

impl CheckReport {
    /// Builds a report for `id`.
    #[must_use]
    pub fn new(id: CheckId, outcome: CheckOutcome, elapsed: Duration) -> Self {
        Self {
            id,
            group: id.group(),
            advisory: id.is_advisory(),
            outcome,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}
