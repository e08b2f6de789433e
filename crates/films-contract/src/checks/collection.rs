// crates/films-contract/src/checks/collection.rs
// ============================================================================
// Module: Collection Checks
// Description: GET on the films collection and required-field presence.
// Purpose: Fetch the collection once per check and validate its envelope.
// Dependencies: serde_json
// ============================================================================

//! Exposes [`fetch_collection`] for the field checks, which re-fetch the
//! collection instead of sharing a response.

use reqwest::StatusCode;
use serde_json::Value;

use super::CheckContext;
use super::CheckError;
use super::CheckResult;
use super::decode_body;
use super::expect_status;
use super::film_label;
use super::json_type;
use crate::check::CheckFailure;
use crate::model::FilmCollection;
use crate::model::FilmField;
use crate::model::RawFilm;

/// `collection`: status 200, valid envelope, every film carries every field.
pub(super) fn check_collection(ctx: &CheckContext) -> CheckResult {
    let films = fetch_collection(ctx)?;
    for (index, film) in films.iter().enumerate() {
        let missing: Vec<&str> = FilmField::ALL
            .into_iter()
            .map(FilmField::as_str)
            .filter(|key| !film.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(CheckFailure::new(format!(
                "{} is missing required fields: {}",
                film_label(index, film),
                missing.join(", ")
            ))
            .into());
        }
    }
    Ok(())
}

/// Fetches the collection and returns its `results` as raw records.
///
/// Fails when the status is not 200, the envelope does not decode, or an entry
/// in `results` is not a JSON object.
pub(super) fn fetch_collection(ctx: &CheckContext) -> Result<Vec<RawFilm>, CheckError> {
    let exchange = ctx.client.get(ctx.endpoints.collection())?;
    expect_status(&exchange, StatusCode::OK)?;
    let collection: FilmCollection = decode_body(&exchange, "a collection response")?;
    let mut films = Vec::with_capacity(collection.results.len());
    for (index, entry) in collection.results.into_iter().enumerate() {
        match entry {
            Value::Object(record) => films.push(record),
            other => {
                return Err(CheckFailure::mismatch(
                    format!("results[{index}]"),
                    "an object",
                    json_type(&other),
                )
                .into());
            }
        }
    }
    Ok(films)
}
