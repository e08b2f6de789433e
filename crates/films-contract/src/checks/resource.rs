// crates/films-contract/src/checks/resource.rs
// ============================================================================
// Module: Single-Resource Checks
// Description: Deep checks on the known film served at `films/1/`.
// Purpose: Assert exact values, reference prefixes, latency, and repeatability.
// Dependencies: reqwest
// ============================================================================

//! ## Overview
//! Every check here fetches [`A_NEW_HOPE`] independently. The latency check
//! measures the time from sending the request until response headers arrive.

use reqwest::StatusCode;

use super::CheckContext;
use super::CheckError;
use super::CheckResult;
use super::decode_body;
use super::ensure;
use super::ensure_eq;
use super::expect_status;
use crate::check::CheckFailure;
use crate::client::Exchange;
use crate::expectations::A_NEW_HOPE;
use crate::model::Film;
use crate::model::ReferenceCategory;

/// `film-1-status`: status 200.
pub(super) fn check_status(ctx: &CheckContext) -> CheckResult {
    let exchange = fetch(ctx)?;
    expect_status(&exchange, StatusCode::OK)?;
    Ok(())
}

/// `film-1-details`: title, episode, crawl excerpt, crew, and self-link.
pub(super) fn check_details(ctx: &CheckContext) -> CheckResult {
    let film = fetch_film(ctx)?;
    let expected_url = ctx.endpoints.film(A_NEW_HOPE.id)?;
    ensure_eq("title", A_NEW_HOPE.title, film.title.as_str())?;
    ensure_eq("episode_id", &A_NEW_HOPE.episode_id, &film.episode_id)?;
    ensure(film.opening_crawl.contains(A_NEW_HOPE.opening_crawl_excerpt), || {
        format!("opening_crawl does not contain \"{}\"", A_NEW_HOPE.opening_crawl_excerpt)
    })?;
    ensure_eq("director", A_NEW_HOPE.director, film.director.as_str())?;
    ensure_eq("producer", A_NEW_HOPE.producer, film.producer.as_str())?;
    ensure_eq("url", expected_url.as_str(), film.url.as_str())?;
    Ok(())
}

/// `film-1-references`: every reference URL starts with its category prefix.
pub(super) fn check_references(ctx: &CheckContext) -> CheckResult {
    let film = fetch_film(ctx)?;
    for category in ReferenceCategory::ALL {
        let prefix = ctx.endpoints.reference_prefix(category)?;
        if let Some(url) =
            film.references(category).iter().find(|url| !url.starts_with(prefix.as_str()))
        {
            return Err(CheckFailure::mismatch(
                format!("{} URL in `{}`", category.noun(), category.field()),
                format!("prefix {prefix}"),
                url,
            )
            .into());
        }
    }
    Ok(())
}

/// `film-1-dates`: release date and audit timestamps.
pub(super) fn check_dates(ctx: &CheckContext) -> CheckResult {
    let film = fetch_film(ctx)?;
    ensure_eq("release_date", A_NEW_HOPE.release_date, film.release_date.as_str())?;
    ensure_eq("created", A_NEW_HOPE.created, film.created.as_str())?;
    ensure_eq("edited", A_NEW_HOPE.edited, film.edited.as_str())?;
    Ok(())
}

/// `film-1-latency`: the round trip fits the latency budget.
pub(super) fn check_latency(ctx: &CheckContext) -> CheckResult {
    let exchange = fetch(ctx)?;
    if exchange.elapsed < ctx.latency_budget {
        return Ok(());
    }
    Err(CheckFailure::mismatch(
        "GET films/1/ round trip",
        format!("under {} ms", ctx.latency_budget.as_millis()),
        format!("{} ms", exchange.elapsed.as_millis()),
    )
    .into())
}

/// `film-1-repeatable`: two fetches agree on identity and date fields.
pub(super) fn check_repeatable(ctx: &CheckContext) -> CheckResult {
    let first = fetch_film(ctx)?;
    let second = fetch_film(ctx)?;
    ensure_eq("title across requests", first.title.as_str(), second.title.as_str())?;
    ensure_eq("episode_id across requests", &first.episode_id, &second.episode_id)?;
    ensure_eq(
        "release_date across requests",
        first.release_date.as_str(),
        second.release_date.as_str(),
    )?;
    ensure_eq("created across requests", first.created.as_str(), second.created.as_str())?;
    ensure_eq("edited across requests", first.edited.as_str(), second.edited.as_str())?;
    Ok(())
}

/// Issues `GET films/1/`.
fn fetch(ctx: &CheckContext) -> Result<Exchange, CheckError> {
    let url = ctx.endpoints.film(A_NEW_HOPE.id)?;
    Ok(ctx.client.get(&url)?)
}

/// Issues `GET films/1/`, requires 200, and decodes the film.
fn fetch_film(ctx: &CheckContext) -> Result<Film, CheckError> {
    let exchange = fetch(ctx)?;
    expect_status(&exchange, StatusCode::OK)?;
    decode_body(&exchange, "a film record")
}
