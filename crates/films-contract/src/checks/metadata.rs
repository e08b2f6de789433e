// crates/films-contract/src/checks/metadata.rs
// ============================================================================
// Module: Metadata Checks
// Description: HEAD and OPTIONS probes on the films collection.
// Purpose: Verify advertised headers and media types.
// Dependencies: reqwest
// ============================================================================

//! Header presence is compared case-insensitively. Media types are checked
//! for containment; extra advertised types are allowed.

use reqwest::Method;
use reqwest::StatusCode;

use super::CheckContext;
use super::CheckResult;
use super::decode_body;
use super::ensure;
use super::expect_status;
use crate::expectations::EXPECTED_HEAD_HEADERS;
use crate::expectations::EXPECTED_PARSES;
use crate::expectations::EXPECTED_RENDERS;
use crate::model::MediaTypes;

/// `head-headers`: status 200 and every expected header name present.
pub(super) fn check_head_headers(ctx: &CheckContext) -> CheckResult {
    let exchange = ctx.client.send(Method::HEAD, ctx.endpoints.collection())?;
    expect_status(&exchange, StatusCode::OK)?;
    let missing: Vec<&str> = EXPECTED_HEAD_HEADERS
        .into_iter()
        .filter(|name| !exchange.has_header(name))
        .collect();
    ensure(missing.is_empty(), || format!("HEAD response is missing headers: {}", missing.join(", ")))?;
    Ok(())
}

/// `options-media-types`: status 200 and the expected `renders`/`parses` entries.
pub(super) fn check_options_media_types(ctx: &CheckContext) -> CheckResult {
    let exchange = ctx.client.send(Method::OPTIONS, ctx.endpoints.collection())?;
    expect_status(&exchange, StatusCode::OK)?;
    let media: MediaTypes = decode_body(&exchange, "an object with `renders` and `parses`")?;
    ensure_contains("renders", &media.renders, &EXPECTED_RENDERS)?;
    ensure_contains("parses", &media.parses, &EXPECTED_PARSES)?;
    Ok(())
}

/// Fails unless every expected media type appears in `advertised`.
fn ensure_contains(key: &str, advertised: &[String], expected: &[&str]) -> CheckResult {
    let missing: Vec<&str> = expected
        .iter()
        .copied()
        .filter(|media_type| !advertised.iter().any(|entry| entry == media_type))
        .collect();
    ensure(missing.is_empty(), || {
        format!("`{key}` is missing {}; advertised [{}]", missing.join(", "), advertised.join(", "))
    })?;
    Ok(())
}
