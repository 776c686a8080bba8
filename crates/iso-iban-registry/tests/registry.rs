//! Consistency and generation tests over the embedded registry.

use iso_iban::{Iban, ValidationError};
use iso_iban_registry::builtin;

#[test]
fn test_builtin_loads() {
    let table = builtin().unwrap();
    assert!(table.len() >= 60, "only {} countries", table.len());
    assert!(table.contains("CH"));
    assert!(table.contains("DE"));
    assert!(table.contains("GB"));
}

#[test]
fn test_builtin_swiss_entry() {
    let table = builtin().unwrap();
    let spec = table.get("CH").unwrap();
    assert_eq!(spec.country_name(), "Switzerland");
    assert_eq!(spec.structure(), "CH2!n5!n12!c");
    assert_eq!(spec.iban_length(), 21);
    assert_eq!(spec.bban_length(), 17);
    assert_eq!(spec.bank_range().map(|r| (r.from, r.to)), Some((4, 8)));
    assert_eq!(spec.branch_range(), None);
    assert_eq!(spec.component_lengths(), vec![5, 12]);
}

#[test]
fn test_every_entry_is_internally_consistent() {
    // Specification::new already enforces the load-time invariants, so the
    // whole table building is the assertion; spot-check the derived fields.
    let table = builtin().unwrap();
    for spec in table.specifications() {
        assert_eq!(
            spec.bban_length(),
            spec.bank_code_length() + spec.branch_code_length() + spec.account_code_length(),
            "{}",
            spec.country_code()
        );
        assert_eq!(spec.compiled().max_length(), spec.iban_length(), "{}", spec.country_code());
    }
}

#[test]
fn test_random_is_valid_for_every_country() {
    let table = builtin().unwrap();
    let countries: Vec<&str> = table.countries().collect();
    for country in countries {
        for _ in 0..4 {
            let iban = Iban::random(&table, &[country]).unwrap();
            assert!(iban.is_valid(), "{country}: {iban:?} -> {:?}", iban.validate());
            assert_eq!(iban.country_code(), country);
        }
    }
}

#[test]
fn test_generate_against_builtin() {
    let table = builtin().unwrap();
    let iban = Iban::generate(&table, "CH", &["123", "9876B"]).unwrap();
    assert_eq!(iban.formatted(), "CH76 0012 3000 0000 9876 B");

    let german = Iban::generate(&table, "DE", &["37040044", "532013000"]).unwrap();
    assert!(german.is_valid());
    assert_eq!(german.bank_code(), Some("37040044"));
    assert_eq!(german.account_code(), "0532013000");
}

#[test]
fn test_known_ibans_validate() {
    let table = builtin().unwrap();
    for raw in [
        "CH35 1234 5987 6543 2109 A",
        "GB29 NWBK 6016 1331 9268 19",
        "DE89 3704 0044 0532 0130 00",
        "FR14 2004 1010 0505 0001 3M02 606",
        "NO93 8601 1117 947",
    ] {
        let iban = Iban::parse(&table, raw);
        assert!(iban.is_valid(), "{raw}: {:?}", iban.validate());
    }
}

#[test]
fn test_checksum_tampering_is_detected() {
    let table = builtin().unwrap();
    let iban = Iban::parse(&table, "DE88 3704 0044 0532 0130 00");
    assert_eq!(iban.validate(), vec![ValidationError::InvalidChecksum]);
}

#[test]
fn test_builtin_round_trips_through_json() {
    let table = builtin().unwrap();
    let text = iso_iban_registry::to_json_string(&table).unwrap();
    let reloaded = iso_iban_registry::from_json_str(&text).unwrap();
    assert_eq!(reloaded.len(), table.len());
    assert_eq!(reloaded.get("CH"), table.get("CH"));
    assert_eq!(reloaded.get("GB"), table.get("GB"));
}
