//! Per-country IBAN specifications and the table that holds them.
//!
//! SWIFT is the registration authority for ISO 13616; every country registers
//! its IBAN layout (structure descriptor, lengths, bank/branch field
//! positions) with them. A [`Specification`] is the engine's rendering of one
//! registry row, with its structure descriptor compiled at construction;
//! a malformed or inconsistent row fails when the table is loaded, never
//! while an IBAN is being validated.
//!
//! The [`SpecificationTable`] is built once by the caller (see the
//! `iso-iban-registry` crate for ready-made loaders), is immutable in use,
//! and is shared read-only by every [`Iban`](crate::Iban) parsed against it.

use std::collections::HashMap;

use crate::error::IbanError;
use crate::structure::Structure;

/// An inclusive range of character offsets into a compact IBAN.
///
/// Offsets are 0-based; the SWIFT registry prints field positions 1-based
/// relative to the BBAN, which is `from + 3` away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    /// First character offset of the field.
    pub from: usize,
    /// Last character offset of the field (inclusive).
    pub to: usize,
}

impl FieldRange {
    /// Create a range over `from..=to`.
    pub fn new(from: usize, to: usize) -> Self {
        FieldRange { from, to }
    }

    /// Number of characters the field covers.
    pub fn len(&self) -> usize {
        self.to - self.from + 1
    }

    /// Whether the range is degenerate. Never true for a range that passed
    /// specification validation.
    pub fn is_empty(&self) -> bool {
        self.to < self.from
    }

    /// The field's substring of `compact`, if in bounds.
    pub fn slice<'c>(&self, compact: &'c str) -> Option<&'c str> {
        compact.get(self.from..=self.to)
    }
}

/// The IBAN format specification of one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specification {
    country_name: String,
    country_code: String,
    structure: String,
    iban_length: usize,
    bban_structure: String,
    bban_length: usize,
    bank_range: Option<FieldRange>,
    branch_range: Option<FieldRange>,
    compiled: Structure,
}

impl Specification {
    /// Build a specification, compiling its structure descriptor and
    /// checking the registry invariants:
    ///
    /// - the country code is two uppercase ASCII letters;
    /// - the descriptor compiles and its token lengths sum to `iban_length`;
    /// - `bban_length == iban_length - 4` and the BBAN descriptor is the
    ///   full descriptor minus the country/check-digit prefix;
    /// - field ranges lie inside the BBAN portion, in order, with the branch
    ///   field only present alongside a bank field.
    ///
    /// Violations are load-time errors.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        country_name: &str,
        country_code: &str,
        structure: &str,
        iban_length: usize,
        bban_structure: &str,
        bban_length: usize,
        bank_range: Option<FieldRange>,
        branch_range: Option<FieldRange>,
    ) -> Result<Self, IbanError> {
        let inconsistent = |detail: &str| IbanError::InconsistentSpecification {
            country: country_code.to_string(),
            detail: detail.to_string(),
        };

        if country_code.len() != 2 || !country_code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(inconsistent("country code must be two uppercase letters"));
        }

        let compiled = Structure::parse(structure)?;

        if compiled.max_length() != iban_length {
            return Err(inconsistent("structure token lengths do not sum to the IBAN length"));
        }
        if iban_length < 4 || bban_length != iban_length - 4 {
            return Err(inconsistent("BBAN length must be the IBAN length minus 4"));
        }
        if structure.get(..2) != Some(country_code) {
            return Err(inconsistent("structure must open with the country code"));
        }
        if structure.get(5..) != Some(bban_structure) {
            return Err(inconsistent("BBAN structure must be the structure after the check digits"));
        }
        if branch_range.is_some() && bank_range.is_none() {
            return Err(inconsistent("branch field requires a bank field"));
        }
        for range in [bank_range, branch_range].into_iter().flatten() {
            if range.from < 4 || range.to >= iban_length || range.is_empty() {
                return Err(inconsistent("field range outside the BBAN"));
            }
        }

        Ok(Specification {
            country_name: country_name.to_string(),
            country_code: country_code.to_string(),
            structure: structure.to_string(),
            iban_length,
            bban_structure: bban_structure.to_string(),
            bban_length,
            bank_range,
            branch_range,
            compiled,
        })
    }

    /// Human-readable country name.
    pub fn country_name(&self) -> &str {
        &self.country_name
    }

    /// ISO 3166 2-letter country code.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// The full structure descriptor, e.g. `"CH2!n5!n12!c"`.
    pub fn structure(&self) -> &str {
        &self.structure
    }

    /// Total compact-form length.
    pub fn iban_length(&self) -> usize {
        self.iban_length
    }

    /// Structure descriptor of the BBAN (the part after country code and
    /// check digits).
    pub fn bban_structure(&self) -> &str {
        &self.bban_structure
    }

    /// Length of the BBAN.
    pub fn bban_length(&self) -> usize {
        self.bban_length
    }

    /// Offsets of the bank identifier within the compact IBAN.
    pub fn bank_range(&self) -> Option<FieldRange> {
        self.bank_range
    }

    /// Offsets of the branch identifier within the compact IBAN.
    pub fn branch_range(&self) -> Option<FieldRange> {
        self.branch_range
    }

    /// The compiled structure matcher, shared by every IBAN of this country.
    pub fn compiled(&self) -> &Structure {
        &self.compiled
    }

    /// Length of the bank identifier, 0 when the country defines none.
    pub fn bank_code_length(&self) -> usize {
        self.bank_range.map_or(0, |r| r.len())
    }

    /// Length of the branch identifier, 0 when the country defines none.
    pub fn branch_code_length(&self) -> usize {
        self.branch_range.map_or(0, |r| r.len())
    }

    /// Length of the account identifier: whatever the bank and branch fields
    /// leave of the BBAN.
    pub fn account_code_length(&self) -> usize {
        self.bban_length - self.bank_code_length() - self.branch_code_length()
    }

    /// Ordered lengths of the bank, branch and account fields with
    /// zero-length entries omitted: the component widths
    /// [`Iban::generate`](crate::Iban::generate) expects.
    pub fn component_lengths(&self) -> Vec<usize> {
        [
            self.bank_code_length(),
            self.branch_code_length(),
            self.account_code_length(),
        ]
        .into_iter()
        .filter(|&length| length != 0)
        .collect()
    }
}

/// An immutable mapping from 2-letter country code to [`Specification`].
///
/// Built once by the caller, then shared read-only; nothing in the engine
/// mutates a specification after load.
#[derive(Debug, Clone, Default)]
pub struct SpecificationTable {
    specifications: HashMap<String, Specification>,
}

impl SpecificationTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a specification, keyed by its country code. Returns the
    /// previous entry for that country, if any.
    pub fn insert(&mut self, specification: Specification) -> Option<Specification> {
        self.specifications
            .insert(specification.country_code().to_string(), specification)
    }

    /// Look up the specification for a country code.
    pub fn get(&self, country_code: &str) -> Option<&Specification> {
        self.specifications.get(country_code)
    }

    /// Whether the table knows `country_code`.
    pub fn contains(&self, country_code: &str) -> bool {
        self.specifications.contains_key(country_code)
    }

    /// Iterate over the known country codes (in no particular order).
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.specifications.keys().map(String::as_str)
    }

    /// Iterate over the specifications (in no particular order).
    pub fn specifications(&self) -> impl Iterator<Item = &Specification> {
        self.specifications.values()
    }

    /// Number of countries in the table.
    pub fn len(&self) -> usize {
        self.specifications.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.specifications.is_empty()
    }
}

impl FromIterator<Specification> for SpecificationTable {
    fn from_iter<I: IntoIterator<Item = Specification>>(iter: I) -> Self {
        let mut table = SpecificationTable::new();
        for specification in iter {
            table.insert(specification);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swiss() -> Specification {
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
        .unwrap()
    }

    #[test]
    fn test_lengths() {
        let spec = swiss();
        assert_eq!(spec.iban_length(), 21);
        assert_eq!(spec.bban_length(), 17);
        assert_eq!(spec.bank_code_length(), 5);
        assert_eq!(spec.branch_code_length(), 0);
        assert_eq!(spec.account_code_length(), 12);
    }

    #[test]
    fn test_component_lengths_omit_zero_fields() {
        assert_eq!(swiss().component_lengths(), vec![5, 12]);

        let no_bank = Specification::new(
            "Testland", "XT", "XT2!n8!n", 12, "8!n", 8, None, None,
        )
        .unwrap();
        assert_eq!(no_bank.component_lengths(), vec![8]);

        let with_branch = Specification::new(
            "Testland",
            "XB",
            "XB2!n3!n4!n9!n",
            20,
            "3!n4!n9!n",
            16,
            Some(FieldRange::new(4, 6)),
            Some(FieldRange::new(7, 10)),
        )
        .unwrap();
        assert_eq!(with_branch.component_lengths(), vec![3, 4, 9]);
    }

    #[test]
    fn test_new_rejects_inconsistent_lengths() {
        let result = Specification::new(
            "Switzerland", "CH", "CH2!n5!n12!c", 22, "5!n12!c", 18, None, None,
        );
        assert!(matches!(
            result,
            Err(IbanError::InconsistentSpecification { .. })
        ));
    }

    #[test]
    fn test_new_rejects_mismatched_bban_structure() {
        let result = Specification::new(
            "Switzerland", "CH", "CH2!n5!n12!c", 21, "5!n11!c", 17, None, None,
        );
        assert!(matches!(
            result,
            Err(IbanError::InconsistentSpecification { .. })
        ));
    }

    #[test]
    fn test_new_rejects_malformed_descriptor() {
        let result = Specification::new(
            "Switzerland", "CH", "CH2!n5!x12!c", 21, "5!x12!c", 17, None, None,
        );
        assert!(matches!(result, Err(IbanError::MalformedStructure { .. })));
    }

    #[test]
    fn test_new_rejects_range_outside_bban() {
        let result = Specification::new(
            "Switzerland",
            "CH",
            "CH2!n5!n12!c",
            21,
            "5!n12!c",
            17,
            Some(FieldRange::new(2, 8)),
            None,
        );
        assert!(matches!(
            result,
            Err(IbanError::InconsistentSpecification { .. })
        ));
    }

    #[test]
    fn test_new_rejects_branch_without_bank() {
        let result = Specification::new(
            "Switzerland",
            "CH",
            "CH2!n5!n12!c",
            21,
            "5!n12!c",
            17,
            None,
            Some(FieldRange::new(4, 8)),
        );
        assert!(matches!(
            result,
            Err(IbanError::InconsistentSpecification { .. })
        ));
    }

    #[test]
    fn test_table_lookup() {
        let table: SpecificationTable = [swiss()].into_iter().collect();
        assert!(table.contains("CH"));
        assert!(!table.contains("DE"));
        assert_eq!(table.get("CH").unwrap().country_name(), "Switzerland");
        assert_eq!(table.len(), 1);
        assert_eq!(table.countries().collect::<Vec<_>>(), vec!["CH"]);
    }
}
