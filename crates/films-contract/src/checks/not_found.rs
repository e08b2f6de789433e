// crates/films-contract/src/checks/not_found.rs
// ============================================================================
// Module: Not-Found Checks
// Description: GET on film ids that must not resolve.
// Purpose: Verify the 404 status and the error envelope's detail text.
// Dependencies: reqwest
// ============================================================================

//! Ids `7`, `999`, and `-1` must answer 404 with the standard detail.

use reqwest::StatusCode;

use super::CheckContext;
use super::CheckResult;
use super::decode_body;
use super::ensure_eq;
use super::expect_status;
use crate::check::MissingFilm;
use crate::expectations::NOT_FOUND_DETAIL;
use crate::model::ErrorBody;

/// `not-found:<id>`: status 404 and `detail == "Not found"`.
pub(super) fn check_not_found(ctx: &CheckContext, missing: MissingFilm) -> CheckResult {
    let url = ctx.endpoints.film(missing.id())?;
    let exchange = ctx.client.get(&url)?;
    expect_status(&exchange, StatusCode::NOT_FOUND)?;
    let body: ErrorBody = decode_body(&exchange, "an error response")?;
    ensure_eq("error detail", NOT_FOUND_DETAIL, body.detail.as_str())?;
    Ok(())
}
