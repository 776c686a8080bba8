//! Machine-readable specification tables.
//!
//! The JSON form is a map from 2-letter country code to a record carrying
//! the registry fields. Field positions here are already 0-based inclusive
//! offsets into the compact IBAN (the form the engine works with), not the
//! BBAN-relative positions the SWIFT release prints.
//!
//! ```json
//! {
//!   "CH": {
//!     "country_name": "Switzerland",
//!     "country_code": "CH",
//!     "structure": "CH2!n5!n12!c",
//!     "iban_length": 21,
//!     "bban_structure": "5!n12!c",
//!     "bban_length": 17,
//!     "bank_position_from": 4,
//!     "bank_position_to": 8
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use iso_iban::{FieldRange, Specification, SpecificationTable};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RegistryError;

/// Serialized form of one country's specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecificationRecord {
    /// Human-readable country name.
    pub country_name: String,
    /// ISO 3166 2-letter country code.
    pub country_code: String,
    /// Full structure descriptor, e.g. `"CH2!n5!n12!c"`.
    pub structure: String,
    /// Total compact-form length.
    pub iban_length: usize,
    /// Structure descriptor of the BBAN.
    pub bban_structure: String,
    /// Length of the BBAN.
    pub bban_length: usize,
    /// First offset of the bank identifier in the compact IBAN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_position_from: Option<usize>,
    /// Last offset of the bank identifier (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_position_to: Option<usize>,
    /// First offset of the branch identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_position_from: Option<usize>,
    /// Last offset of the branch identifier (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_position_to: Option<usize>,
}

impl SpecificationRecord {
    /// Build the validated [`Specification`] for this record.
    pub fn into_specification(self) -> Result<Specification, RegistryError> {
        let specification = Specification::new(
            &self.country_name,
            &self.country_code,
            &self.structure,
            self.iban_length,
            &self.bban_structure,
            self.bban_length,
            range(self.bank_position_from, self.bank_position_to),
            range(self.branch_position_from, self.branch_position_to),
        )?;
        Ok(specification)
    }

    /// The serialized form of an existing specification.
    pub fn from_specification(specification: &Specification) -> Self {
        SpecificationRecord {
            country_name: specification.country_name().to_string(),
            country_code: specification.country_code().to_string(),
            structure: specification.structure().to_string(),
            iban_length: specification.iban_length(),
            bban_structure: specification.bban_structure().to_string(),
            bban_length: specification.bban_length(),
            bank_position_from: specification.bank_range().map(|r| r.from),
            bank_position_to: specification.bank_range().map(|r| r.to),
            branch_position_from: specification.branch_range().map(|r| r.from),
            branch_position_to: specification.branch_range().map(|r| r.to),
        }
    }
}

fn range(from: Option<usize>, to: Option<usize>) -> Option<FieldRange> {
    match (from, to) {
        (Some(from), Some(to)) => Some(FieldRange::new(from, to)),
        _ => None,
    }
}

/// Build a specification table from JSON text.
pub fn from_json_str(text: &str) -> Result<SpecificationTable, RegistryError> {
    let records: BTreeMap<String, SpecificationRecord> = serde_json::from_str(text)?;
    let mut table = SpecificationTable::new();
    for record in records.into_values() {
        table.insert(record.into_specification()?);
    }
    info!(countries = table.len(), "loaded specification table from JSON");
    Ok(table)
}

/// Read a specification table from a JSON file.
pub fn load_json(path: impl AsRef<Path>) -> Result<SpecificationTable, RegistryError> {
    let text = fs::read_to_string(path)?;
    from_json_str(&text)
}

/// Serialize a specification table to JSON text (country code → record).
pub fn to_json_string(table: &SpecificationTable) -> Result<String, RegistryError> {
    let records: BTreeMap<&str, SpecificationRecord> = table
        .specifications()
        .map(|spec| (spec.country_code(), SpecificationRecord::from_specification(spec)))
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
