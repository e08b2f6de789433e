// crates/films-contract/src/model.rs
// ============================================================================
// Module: Films Data Model
// Description: Film records, response envelopes, and field descriptors.
// Purpose: Describe the shape the films API is expected to return.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The films API returns read-only snapshots. Checks that validate shape work
//! on raw [`serde_json::Value`] records so one mistyped field is reported
//! against that field alone; checks that compare values decode into [`Film`].
//! [`FilmField`] enumerates the fourteen required fields together with the
//! [`FieldKind`] each one must satisfy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Reference Categories
// ============================================================================

/// Related-resource categories linked from a film.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceCategory {
    /// `characters` field, linking `people/` resources.
    Characters,
    /// `planets` field, linking `planets/` resources.
    Planets,
    /// `starships` field, linking `starships/` resources.
    Starships,
    /// `vehicles` field, linking `vehicles/` resources.
    Vehicles,
    /// `species` field, linking `species/` resources.
    Species,
}

impl ReferenceCategory {
    /// All categories in the order reference checks walk them.
    pub const ALL: [Self; 5] =
        [Self::Characters, Self::Planets, Self::Starships, Self::Vehicles, Self::Species];

    /// Returns the film field holding references of this category.
    #[must_use]
    pub const fn field(self) -> FilmField {
        match self {
            Self::Characters => FilmField::Characters,
            Self::Planets => FilmField::Planets,
            Self::Starships => FilmField::Starships,
            Self::Vehicles => FilmField::Vehicles,
            Self::Species => FilmField::Species,
        }
    }

    /// Returns the path, relative to the service root, that references share.
    #[must_use]
    pub const fn resource_path(self) -> &'static str {
        match self {
            Self::Characters => "people/",
            Self::Planets => "planets/",
            Self::Starships => "starships/",
            Self::Vehicles => "vehicles/",
            Self::Species => "species/",
        }
    }

    /// Singular noun used in failure messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Characters => "character",
            Self::Planets => "planet",
            Self::Starships => "starship",
            Self::Vehicles => "vehicle",
            Self::Species => "species",
        }
    }
}

// ============================================================================
// SECTION: Field Descriptors
// ============================================================================

/// Declared value kind of a film field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// JSON integer.
    Integer,
    /// Calendar date `YYYY-MM-DD`.
    Date,
    /// UTC timestamp with fractional seconds.
    Timestamp,
    /// Ordered list of resource reference URLs.
    References(ReferenceCategory),
    /// Self-reference URL.
    Link,
}

impl FieldKind {
    /// Short description used in failure messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Integer => "an integer",
            Self::Date => "a YYYY-MM-DD date string",
            Self::Timestamp => "a fractional-second UTC timestamp string",
            Self::References(_) => "an array of URL strings",
            Self::Link => "a URL string",
        }
    }
}

/// The fourteen fields every film record must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilmField {
    /// `title`
    Title,
    /// `episode_id`
    EpisodeId,
    /// `opening_crawl`
    OpeningCrawl,
    /// `director`
    Director,
    /// `producer`
    Producer,
    /// `release_date`
    ReleaseDate,
    /// `species`
    Species,
    /// `starships`
    Starships,
    /// `vehicles`
    Vehicles,
    /// `characters`
    Characters,
    /// `planets`
    Planets,
    /// `url`
    Url,
    /// `created`
    Created,
    /// `edited`
    Edited,
}

impl FilmField {
    /// Required fields in wire documentation order.
    pub const ALL: [Self; 14] = [
        Self::Title,
        Self::EpisodeId,
        Self::OpeningCrawl,
        Self::Director,
        Self::Producer,
        Self::ReleaseDate,
        Self::Species,
        Self::Starships,
        Self::Vehicles,
        Self::Characters,
        Self::Planets,
        Self::Url,
        Self::Created,
        Self::Edited,
    ];

    /// Returns the JSON key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::EpisodeId => "episode_id",
            Self::OpeningCrawl => "opening_crawl",
            Self::Director => "director",
            Self::Producer => "producer",
            Self::ReleaseDate => "release_date",
            Self::Species => "species",
            Self::Starships => "starships",
            Self::Vehicles => "vehicles",
            Self::Characters => "characters",
            Self::Planets => "planets",
            Self::Url => "url",
            Self::Created => "created",
            Self::Edited => "edited",
        }
    }

    /// Returns the declared kind of the field.
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Title | Self::OpeningCrawl | Self::Director | Self::Producer => FieldKind::Text,
            Self::EpisodeId => FieldKind::Integer,
            Self::ReleaseDate => FieldKind::Date,
            Self::Species => FieldKind::References(ReferenceCategory::Species),
            Self::Starships => FieldKind::References(ReferenceCategory::Starships),
            Self::Vehicles => FieldKind::References(ReferenceCategory::Vehicles),
            Self::Characters => FieldKind::References(ReferenceCategory::Characters),
            Self::Planets => FieldKind::References(ReferenceCategory::Planets),
            Self::Url => FieldKind::Link,
            Self::Created | Self::Edited => FieldKind::Timestamp,
        }
    }
}

impl fmt::Display for FilmField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Raw film record as returned inside a collection.
pub type RawFilm = Map<String, Value>;

/// Typed film record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    /// Film title.
    pub title: String,
    /// Saga episode number.
    pub episode_id: i64,
    /// Opening crawl text.
    pub opening_crawl: String,
    /// Director name(s).
    pub director: String,
    /// Producer name(s).
    pub producer: String,
    /// Release date, `YYYY-MM-DD`.
    pub release_date: String,
    /// Species references.
    pub species: Vec<String>,
    /// Starship references.
    pub starships: Vec<String>,
    /// Vehicle references.
    pub vehicles: Vec<String>,
    /// Character references.
    pub characters: Vec<String>,
    /// Planet references.
    pub planets: Vec<String>,
    /// Self-reference URL.
    pub url: String,
    /// Creation timestamp.
    pub created: String,
    /// Last edit timestamp.
    pub edited: String,
}

impl Film {
    /// Returns the reference URLs for one category.
    #[must_use]
    pub fn references(&self, category: ReferenceCategory) -> &[String] {
        match category {
            ReferenceCategory::Characters => &self.characters,
            ReferenceCategory::Planets => &self.planets,
            ReferenceCategory::Starships => &self.starships,
            ReferenceCategory::Vehicles => &self.vehicles,
            ReferenceCategory::Species => &self.species,
        }
    }
}

// ============================================================================
// SECTION: Envelopes
// ============================================================================

/// Paginated collection wrapper.
///
/// Only `results` is decoded; `count`, `next`, and `previous` are ignored
/// whatever their type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilmCollection {
    /// Film records on this page.
    pub results: Vec<Value>,
}

/// Error envelope returned for missing resources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error detail.
    pub detail: String,
}

/// Media types advertised by an `OPTIONS` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaTypes {
    /// Response formats the endpoint can render.
    pub renders: Vec<String>,
    /// Request formats the endpoint can parse.
    pub parses: Vec<String>,
}
