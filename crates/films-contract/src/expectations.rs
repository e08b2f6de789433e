// crates/films-contract/src/expectations.rs
// ============================================================================
// Module: Contract Expectations
// Description: Fixed values the films API is expected to serve.
// Purpose: Keep every literal asserted by the checks in one place.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Literal expectations for the films resource. URLs that depend on the
//! service root (the film self-link and reference prefixes) are derived at
//! runtime by [`crate::checks::Endpoints`].

// ============================================================================
// SECTION: Collection Endpoint
// ============================================================================

/// Collection path relative to the service root.
pub const COLLECTION_PATH: &str = "films/";

/// Header names a `HEAD` on the collection must return (presence only).
pub const EXPECTED_HEAD_HEADERS: [&str; 9] = [
    "Server",
    "Date",
    "Content-Type",
    "Connection",
    "Vary",
    "X-Frame-Options",
    "ETag",
    "Allow",
    "Strict-Transport-Security",
];

/// Media types the collection must be able to render.
pub const EXPECTED_RENDERS: [&str; 2] = ["application/json", "text/html"];

/// Media types the collection must be able to parse.
pub const EXPECTED_PARSES: [&str; 3] =
    ["application/json", "application/x-www-form-urlencoded", "multipart/form-data"];

// ============================================================================
// SECTION: Known Film
// ============================================================================

/// Literal values of the film every deep check fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownFilm {
    /// Resource id used in the path.
    pub id: &'static str,
    /// Expected title.
    pub title: &'static str,
    /// Expected episode number.
    pub episode_id: i64,
    /// Text the opening crawl must contain.
    pub opening_crawl_excerpt: &'static str,
    /// Expected director.
    pub director: &'static str,
    /// Expected producer.
    pub producer: &'static str,
    /// Expected release date.
    pub release_date: &'static str,
    /// Expected creation timestamp.
    pub created: &'static str,
    /// Expected edit timestamp.
    pub edited: &'static str,
}

/// `films/1/`: A New Hope.
pub const A_NEW_HOPE: KnownFilm = KnownFilm {
    id: "1",
    title: "A New Hope",
    episode_id: 4,
    opening_crawl_excerpt: "It is a period of civil war.",
    director: "George Lucas",
    producer: "Gary Kurtz, Rick McCallum",
    release_date: "1977-05-25",
    created: "2014-12-10T14:23:31.880000Z",
    edited: "2014-12-20T19:49:45.256000Z",
};

// ============================================================================
// SECTION: Missing Films
// ============================================================================

/// Detail text of the not-found envelope.
pub const NOT_FOUND_DETAIL: &str = "Not found";
