//! End-to-end scenarios for parsing, validation and generation.

use iso_iban::{FieldRange, Iban, IbanError, Specification, SpecificationTable, ValidationError};

fn setup_table() -> SpecificationTable {
    [
        Specification::new(
            "Switzerland",
            "CH",
            "CH2!n5!n12!c",
            21,
            "5!n12!c",
            17,
            Some(FieldRange::new(4, 8)),
            None,
        )
        .unwrap(),
        Specification::new(
            "Germany",
            "DE",
            "DE2!n8!n10!n",
            22,
            "8!n10!n",
            18,
            Some(FieldRange::new(4, 11)),
            None,
        )
        .unwrap(),
        Specification::new(
            "United Kingdom",
            "GB",
            "GB2!n4!a6!n8!n",
            22,
            "4!a6!n8!n",
            18,
            Some(FieldRange::new(4, 7)),
            Some(FieldRange::new(8, 13)),
        )
        .unwrap(),
        Specification::new(
            "Norway",
            "NO",
            "NO2!n4!n6!n1!n",
            15,
            "4!n6!n1!n",
            11,
            Some(FieldRange::new(4, 7)),
            None,
        )
        .unwrap(),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_parse_strips_formatting() {
    let table = setup_table();
    let iban = Iban::parse(&table, "CH35 1234 5987 6543 2109 A");
    assert_eq!(iban.compact(), "CH351234598765432109A");
}

#[test]
fn test_valid_iban_has_no_findings() {
    let table = setup_table();
    let iban = Iban::parse(&table, "CH35 1234 5987 6543 2109 A");
    assert_eq!(iban.validate(), vec![]);
    assert!(iban.is_valid());
}

#[test]
fn test_wrong_check_digits_yield_exactly_invalid_checksum() {
    let table = setup_table();
    let iban = Iban::parse(&table, "CH99 1234 5987 6543 2109 A");
    assert_eq!(iban.validate(), vec![ValidationError::InvalidChecksum]);
}

#[test]
fn test_unknown_country_fails_every_spec_dependent_check() {
    let table = setup_table();
    let iban = Iban::parse(&table, "XX35 1234 5987 6543 2109 A");
    assert_eq!(
        iban.validate(),
        vec![
            ValidationError::InvalidCountry,
            ValidationError::InvalidChecksum,
            ValidationError::InvalidLength,
            ValidationError::InvalidFormat,
        ]
    );
}

#[test]
fn test_bad_characters_reported_alongside_other_findings() {
    let table = setup_table();
    let iban = Iban::parse(&table, "CH35 1234 5987 6543 2109 *");
    let errors = iban.validate();
    assert!(errors.contains(&ValidationError::InvalidCharacters));
    assert!(errors.contains(&ValidationError::InvalidFormat));
    // The checksum has no meaning over an unmappable string.
    assert!(!errors.contains(&ValidationError::InvalidChecksum));
}

#[test]
fn test_draft_placeholder_validates_as_checksum_failure() {
    let table = setup_table();
    let iban = Iban::parse(&table, "CH??1234598765432109A");
    let errors = iban.validate();
    assert!(!errors.contains(&ValidationError::InvalidCharacters));
    assert!(errors.contains(&ValidationError::InvalidChecksum));
}

#[test]
fn test_short_input_fails_cleanly() {
    let table = setup_table();
    for raw in ["", "C", "CH", "CH3", "CH35"] {
        let iban = Iban::parse(&table, raw);
        assert!(iban.numeric().is_none(), "{raw:?}");
        assert!(!iban.is_valid(), "{raw:?}");
    }
}

#[test]
fn test_generate_switzerland() {
    let table = setup_table();
    let iban = Iban::generate(&table, "CH", &["123", "9876B"]).unwrap();
    assert_eq!(iban.formatted(), "CH76 0012 3000 0000 9876 B");
    assert!(iban.is_valid());
}

#[test]
fn test_generate_always_checksum_valid() {
    let table = setup_table();
    for components in [["00123", "000000009876"], ["99999", "ZZZZZZZZZZZZ"], ["1", "A"]] {
        let iban = Iban::generate(&table, "CH", &[components[0], components[1]]).unwrap();
        assert!(iban.is_valid(), "{components:?} -> {:?}", iban.validate());
    }
}

#[test]
fn test_formatted_round_trip() {
    let table = setup_table();
    let original = Iban::parse(&table, "CH3512 34 5987654321-09A");
    let reparsed = Iban::parse(&table, &original.formatted());
    assert_eq!(reparsed.formatted(), original.formatted());
    assert_eq!(reparsed, original);
}

#[test]
fn test_validate_is_idempotent() {
    let table = setup_table();
    let iban = Iban::parse(&table, "XX35 1234 5987 6543 2109 A");
    assert_eq!(iban.validate(), iban.validate());
}

#[test]
fn test_parse_strict_carries_all_findings() {
    let table = setup_table();
    match Iban::parse_strict(&table, "XX35 1234 5987 6543 2109 A") {
        Err(IbanError::Invalid { formatted, errors }) => {
            assert_eq!(formatted, "XX35 1234 5987 6543 2109 A");
            assert_eq!(errors.len(), 4);
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
    assert!(Iban::parse_strict(&table, "CH35 1234 5987 6543 2109 A").is_ok());
}

#[test]
fn test_random_per_country_and_overall() {
    let table = setup_table();
    for country in ["CH", "DE", "GB", "NO"] {
        for _ in 0..8 {
            let iban = Iban::random(&table, &[country]).unwrap();
            assert_eq!(iban.country_code(), country);
            assert!(iban.is_valid(), "{iban:?}: {:?}", iban.validate());
        }
    }
    let any = Iban::random(&table, &[]).unwrap();
    assert!(any.is_valid());
}

#[test]
fn test_numeric_rearrangement_verifies() {
    let table = setup_table();
    let iban = Iban::parse(&table, "CH35 1234 5987 6543 2109 A");
    let numeric = iban.numeric().unwrap();
    assert!(iso_iban::checksum::verify(&numeric));
}
