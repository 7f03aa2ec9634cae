//! The validator's verdict on every kata, before and after segregation.

use segregate::capabilities::SharedRegistry;
use segregate::katas::catalog::{self, KataReport};
use segregate::katas::{Kata, Stage};
use segregate::validation::ValidationPolicy;

fn reports() -> Vec<KataReport> {
    let registry = catalog::registry().unwrap();
    catalog::validate_all(&registry).unwrap()
}

fn report_for<'a>(reports: &'a [KataReport], entity: &str) -> &'a KataReport {
    reports
        .iter()
        .find(|r| r.report.entity == entity)
        .unwrap_or_else(|| panic!("no report for {}", entity))
}

#[test]
fn segregated_entities_are_clean() {
    for entry in reports().iter().filter(|r| r.stage == Stage::After) {
        assert!(entry.report.is_empty(), "{}", entry.report);
        assert!(entry.report.enforce(&ValidationPolicy::strict()).is_ok());
    }
}

#[test]
fn legacy_entities_fake_what_they_cannot_do() {
    let reports = reports();

    assert_eq!(report_for(&reports, "LegacyBird").report.fake(), vec!["swim"]);
    assert_eq!(
        report_for(&reports, "LegacyBasicPrinter").report.fake(),
        vec!["scan", "fax"]
    );
    assert_eq!(
        report_for(&reports, "LegacyBoat").report.fake(),
        vec!["drive", "fly"]
    );
    assert_eq!(
        report_for(&reports, "LegacyPressureSensor").report.fake(),
        vec!["read_temperature", "read_humidity"]
    );
    assert_eq!(
        report_for(&reports, "LegacySmartLight").report.fake(),
        vec!["play_music"]
    );
    assert_eq!(
        report_for(&reports, "LegacyCryptoProcessor").report.fake(),
        vec!["process_credit_card", "process_paypal"]
    );
}

#[test]
fn legacy_speaker_fits_the_monolithic_contract() {
    let reports = reports();
    let speaker = report_for(&reports, "LegacySmartSpeaker");
    assert_eq!(speaker.kata, Kata::Devices);
    assert!(speaker.report.is_empty());
}

#[test]
fn legacy_entities_are_never_incomplete() {
    for entry in reports().iter().filter(|r| r.stage == Stage::Before) {
        assert!(entry.report.missing().is_empty());
        assert!(entry.report.enforce(&ValidationPolicy::advisory()).is_ok());
    }
}

#[test]
fn strict_policy_rejects_legacy_fakes() {
    let reports = reports();
    let bird = report_for(&reports, "LegacyBird");
    assert!(bird.report.enforce(&ValidationPolicy::strict()).is_err());
}

#[test]
fn catalog_works_against_a_shared_registry() {
    let shared = SharedRegistry::new();
    shared.write(catalog::register_all).unwrap();

    let reports = catalog::validate_all(&shared).unwrap();
    assert_eq!(reports.len(), catalog::entities(&shared).unwrap().len());
    assert_eq!(
        reports.iter().filter(|r| r.stage == Stage::Before).count(),
        13
    );
}

#[test]
fn reports_serialize_flat() {
    let reports = reports();
    let json = serde_json::to_value(report_for(&reports, "LegacyBird")).unwrap();
    assert_eq!(json["kata"], "animals");
    assert_eq!(json["stage"], "before");
    assert_eq!(json["entity"], "LegacyBird");
    assert_eq!(json["findings"][0]["kind"], "fake_implementation");
}
