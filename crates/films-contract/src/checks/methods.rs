// crates/films-contract/src/checks/methods.rs
// ============================================================================
// Module: Method Restriction Checks
// Description: Write methods on the read-only films collection.
// Purpose: Verify the collection rejects POST, PUT, PATCH, and DELETE.
// Dependencies: reqwest
// ============================================================================

//! Each restricted method is its own check so one accepted write does not
//! hide the status of the others.

use reqwest::StatusCode;

use super::CheckContext;
use super::CheckResult;
use super::expect_status;
use crate::check::RestrictedMethod;

/// `method-not-allowed:<method>`: the collection answers `405`.
pub(super) fn check_method_not_allowed(ctx: &CheckContext, method: RestrictedMethod) -> CheckResult {
    let exchange = ctx.client.send(method.method(), ctx.endpoints.collection())?;
    expect_status(&exchange, StatusCode::METHOD_NOT_ALLOWED)?;
    Ok(())
}
