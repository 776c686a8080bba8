//! Specification tables for the `iso-iban` engine.
//!
//! The engine itself performs no I/O; this crate is the loading collaborator
//! that hands it a ready-built [`SpecificationTable`]:
//!
//! - [`builtin`]: the embedded ISO 13616 registry, no files needed;
//! - [`load_json`] / [`from_json_str`]: the machine-readable table format;
//! - [`load_swift_registry`] / [`parse_swift_registry`]: the tab-separated
//!   registry release as SWIFT publishes it.
//!
//! # Example
//!
//! ```
//! let table = iso_iban_registry::builtin()?;
//! let iban = table.parse("CH35 1234 5987 6543 2109 A");
//! assert!(iban.is_valid());
//! # Ok::<(), iso_iban_registry::RegistryError>(())
//! ```

mod data;
pub mod error;
pub mod json;
pub mod swift;

use iso_iban::{FieldRange, Specification, SpecificationTable};
use tracing::debug;

pub use error::RegistryError;
pub use json::{from_json_str, load_json, to_json_string, SpecificationRecord};
pub use swift::{load_swift_registry, parse_swift_registry};

/// The embedded ISO 13616 registry as a ready-to-use table.
///
/// Fails only if the embedded data itself is inconsistent, which is a defect
/// of this crate rather than of the caller.
pub fn builtin() -> Result<SpecificationTable, RegistryError> {
    let mut table = SpecificationTable::new();
    for raw in data::SPECIFICATIONS {
        let structure = format!("{}2!n{}", raw.code, raw.bban_structure);
        let specification = Specification::new(
            raw.name,
            raw.code,
            &structure,
            raw.iban_length,
            raw.bban_structure,
            raw.iban_length - 4,
            raw.bank.map(to_field_range),
            raw.branch.map(to_field_range),
        )?;
        table.insert(specification);
    }
    debug!(countries = table.len(), "built embedded specification table");
    Ok(table)
}

/// Embedded positions are 1-based within the BBAN, like the registry prints
/// them; shift onto 0-based compact-IBAN offsets.
fn to_field_range((from, to): (usize, usize)) -> FieldRange {
    FieldRange::new(from + 3, to + 3)
}
