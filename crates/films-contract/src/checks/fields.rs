// crates/films-contract/src/checks/fields.rs
// ============================================================================
// Module: Field Checks
// Description: Per-field type and format validation across the collection.
// Purpose: Isolate a type or format regression to a single field.
// Dependencies: serde_json
// ============================================================================

//! One check per film field.

use serde_json::Value;

use super::CheckContext;
use super::CheckResult;
use super::collection::fetch_collection;
use super::film_label;
use super::json_type;
use crate::check::CheckFailure;
use crate::formats::DATE_PATTERN;
use crate::formats::FormatRules;
use crate::formats::TIMESTAMP_PATTERN;
use crate::model::FieldKind;
use crate::model::FilmField;

/// `field:<name>`: the field is present and well-formed in every film.
pub(super) fn check_field(ctx: &CheckContext, field: FilmField) -> CheckResult {
    let films = fetch_collection(ctx)?;
    for (index, film) in films.iter().enumerate() {
        let subject = format!("{} `{field}`", film_label(index, film));
        let Some(value) = film.get(field.as_str()) else {
            return Err(CheckFailure::new(format!("{subject} is missing")).into());
        };
        validate_value(&ctx.rules, field.kind(), value)
            .map_err(|detail| CheckFailure::new(format!("{subject} {detail}")))?;
    }
    Ok(())
}

/// Validates one value against its declared kind.
///
/// Returns a fragment completing the sentence "`<film> <field>` ..." on failure.
fn validate_value(rules: &FormatRules, kind: FieldKind, value: &Value) -> Result<(), String> {
    let type_mismatch = || format!("must be {}, observed {}", kind.describe(), json_type(value));
    match kind {
        FieldKind::Text | FieldKind::Link => {
            value.as_str().map(|_| ()).ok_or_else(type_mismatch)
        }
        FieldKind::Integer => {
            if value.is_i64() || value.is_u64() { Ok(()) } else { Err(type_mismatch()) }
        }
        FieldKind::Date => {
            let text = value.as_str().ok_or_else(type_mismatch)?;
            if !rules.matches_date(text) {
                return Err(format!("\"{text}\" does not match {DATE_PATTERN}"));
            }
            if !rules.is_calendar_date(text) {
                return Err(format!("\"{text}\" is not a calendar date"));
            }
            Ok(())
        }
        FieldKind::Timestamp => {
            let text = value.as_str().ok_or_else(type_mismatch)?;
            if rules.matches_timestamp(text) {
                Ok(())
            } else {
                Err(format!("\"{text}\" does not match {TIMESTAMP_PATTERN}"))
            }
        }
        FieldKind::References(_) => {
            let items = value.as_array().ok_or_else(type_mismatch)?;
            match items.iter().enumerate().find(|(_, item)| !item.is_string()) {
                None => Ok(()),
                Some((position, item)) => Err(format!(
                    "item {position} must be a URL string, observed {}",
                    json_type(item)
                )),
            }
        }
    }
}
