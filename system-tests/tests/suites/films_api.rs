// system-tests/tests/suites/films_api.rs
// ============================================================================
// Module: Films API Live Tests
// Description: One live test per films contract check.
// Purpose: Report each contract property as its own test result.
// Dependencies: system-tests helpers, films-contract
// ============================================================================

//! Live films contract tests. Each test writes `check.json` plus a verdict summary
//! under the run root.

use std::fs;
use std::time::Duration;

use films_contract::CheckFailure;
use films_contract::CheckId;
use films_contract::CheckOutcome;
use films_contract::CheckReport;
use films_contract::FilmField;
use films_contract::MissingFilm;
use films_contract::RestrictedMethod;

use crate::helpers::artifacts::CheckRecorder;
use crate::helpers::artifacts::Verdict;
use crate::helpers::live::assert_live_check;

type DynError = Box<dyn std::error::Error>;

#[test]
fn collection_lists_films_with_all_fields() -> Result<(), DynError> {
    assert_live_check("collection_lists_films_with_all_fields", CheckId::Collection)
}

#[test]
fn head_returns_expected_headers() -> Result<(), DynError> {
    assert_live_check("head_returns_expected_headers", CheckId::HeadHeaders)
}

#[test]
fn options_advertises_media_types() -> Result<(), DynError> {
    assert_live_check("options_advertises_media_types", CheckId::OptionsMediaTypes)
}

#[test]
fn field_title_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_title_is_well_formed", CheckId::Field(FilmField::Title))
}

#[test]
fn field_episode_id_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_episode_id_is_well_formed", CheckId::Field(FilmField::EpisodeId))
}

#[test]
fn field_opening_crawl_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_opening_crawl_is_well_formed", CheckId::Field(FilmField::OpeningCrawl))
}

#[test]
fn field_director_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_director_is_well_formed", CheckId::Field(FilmField::Director))
}

#[test]
fn field_producer_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_producer_is_well_formed", CheckId::Field(FilmField::Producer))
}

#[test]
fn field_release_date_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_release_date_is_well_formed", CheckId::Field(FilmField::ReleaseDate))
}

#[test]
fn field_species_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_species_is_well_formed", CheckId::Field(FilmField::Species))
}

#[test]
fn field_starships_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_starships_is_well_formed", CheckId::Field(FilmField::Starships))
}

#[test]
fn field_vehicles_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_vehicles_is_well_formed", CheckId::Field(FilmField::Vehicles))
}

#[test]
fn field_characters_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_characters_is_well_formed", CheckId::Field(FilmField::Characters))
}

#[test]
fn field_planets_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_planets_is_well_formed", CheckId::Field(FilmField::Planets))
}

#[test]
fn field_url_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_url_is_well_formed", CheckId::Field(FilmField::Url))
}

#[test]
fn field_created_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_created_is_well_formed", CheckId::Field(FilmField::Created))
}

#[test]
fn field_edited_is_well_formed() -> Result<(), DynError> {
    assert_live_check("field_edited_is_well_formed", CheckId::Field(FilmField::Edited))
}

#[test]
fn film_one_returns_ok() -> Result<(), DynError> {
    assert_live_check("film_one_returns_ok", CheckId::FilmStatus)
}

#[test]
fn film_one_has_expected_details() -> Result<(), DynError> {
    assert_live_check("film_one_has_expected_details", CheckId::FilmDetails)
}

#[test]
fn film_one_references_carry_prefixes() -> Result<(), DynError> {
    assert_live_check("film_one_references_carry_prefixes", CheckId::FilmReferences)
}

#[test]
fn film_one_has_expected_dates() -> Result<(), DynError> {
    assert_live_check("film_one_has_expected_dates", CheckId::FilmDates)
}

#[test]
fn film_one_meets_latency_budget() -> Result<(), DynError> {
    assert_live_check("film_one_meets_latency_budget", CheckId::FilmLatency)
}

#[test]
fn film_one_is_repeatable() -> Result<(), DynError> {
    assert_live_check("film_one_is_repeatable", CheckId::FilmRepeatable)
}

#[test]
fn post_on_collection_is_rejected() -> Result<(), DynError> {
    assert_live_check("post_on_collection_is_rejected", CheckId::MethodNotAllowed(RestrictedMethod::Post))
}

#[test]
fn put_on_collection_is_rejected() -> Result<(), DynError> {
    assert_live_check("put_on_collection_is_rejected", CheckId::MethodNotAllowed(RestrictedMethod::Put))
}

#[test]
fn patch_on_collection_is_rejected() -> Result<(), DynError> {
    assert_live_check("patch_on_collection_is_rejected", CheckId::MethodNotAllowed(RestrictedMethod::Patch))
}

#[test]
fn delete_on_collection_is_rejected() -> Result<(), DynError> {
    assert_live_check("delete_on_collection_is_rejected", CheckId::MethodNotAllowed(RestrictedMethod::Delete))
}

#[test]
fn film_seven_is_not_found() -> Result<(), DynError> {
    assert_live_check("film_seven_is_not_found", CheckId::NotFound(MissingFilm::Seven))
}

#[test]
fn film_nine_hundred_ninety_nine_is_not_found() -> Result<(), DynError> {
    assert_live_check("film_nine_hundred_ninety_nine_is_not_found", CheckId::NotFound(MissingFilm::NineHundredNinetyNine))
}

#[test]
fn film_minus_one_is_not_found() -> Result<(), DynError> {
    assert_live_check("film_minus_one_is_not_found", CheckId::NotFound(MissingFilm::MinusOne))
}

#[test]
fn suite_covers_the_whole_catalog() {
    assert_eq!(CheckId::catalog().len(), 30);
}

// ============================================================================
// SECTION: Artifact Recording
// ============================================================================

#[test]
fn recorder_waives_relaxed_advisory_failure() -> Result<(), DynError> {
    let id = CheckId::HeadHeaders;
    let mut recorder = CheckRecorder::new(
        "recorder_waives_relaxed_advisory_failure",
        id,
        "http://127.0.0.1:9/api/",
        false,
    )?;
    let report = CheckReport::new(
        id,
        CheckOutcome::Failed {
            failure: CheckFailure::new("HEAD response is missing headers: ETag"),
        },
        Duration::from_millis(12),
    );
    assert_eq!(recorder.record(&report)?, Verdict::Waived);

    let summary: serde_json::Value =
        serde_json::from_slice(&fs::read(recorder.root().join("summary.json"))?)?;
    assert_eq!(summary["check"], "head-headers");
    assert_eq!(summary["group"], "metadata");
    assert_eq!(summary["advisory"], true);
    assert_eq!(summary["enforced"], false);
    assert_eq!(summary["verdict"], "waived");
    assert_eq!(summary["outcome"], "failed");
    assert_eq!(summary["elapsed_ms"], 12);
    assert!(recorder.root().join("check.json").exists());
    let markdown = fs::read_to_string(recorder.root().join("summary.md"))?;
    assert!(markdown.contains("- Verdict: waived"), "{markdown}");
    Ok(())
}

#[test]
fn recorder_fails_strict_advisory_failure() -> Result<(), DynError> {
    let id = CheckId::FilmLatency;
    let mut recorder = CheckRecorder::new(
        "recorder_fails_strict_advisory_failure",
        id,
        "http://127.0.0.1:9/api/",
        true,
    )?;
    let report = CheckReport::new(
        id,
        CheckOutcome::Error {
            message: "connection refused".to_string(),
        },
        Duration::ZERO,
    );
    assert_eq!(recorder.record(&report)?, Verdict::Fail);
    Ok(())
}

#[test]
fn unrecorded_check_leaves_aborted_summary() -> Result<(), DynError> {
    let recorder = CheckRecorder::new(
        "unrecorded_check_leaves_aborted_summary",
        CheckId::Collection,
        "http://127.0.0.1:9/api/",
        false,
    )?;
    let path = recorder.root().join("summary.json");
    drop(recorder);

    let summary: serde_json::Value = serde_json::from_slice(&fs::read(path)?)?;
    assert_eq!(summary["verdict"], "aborted");
    assert_eq!(summary["check"], "collection");
    assert!(summary["outcome"].is_null());
    Ok(())
}
