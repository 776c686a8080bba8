//! ISO 13616-1 IBAN parsing, validation and generation.
//!
//! The IBAN (International Bank Account Number) is a country-prefixed
//! account identifier with an embedded ISO/IEC 7064 MOD97-10 checksum. Each
//! country registers its layout with SWIFT as a compact structure descriptor
//! (e.g. `"CH2!n5!n12!c"`); this crate compiles those descriptors, validates
//! and decomposes IBANs against them, and generates new checksum-correct
//! IBANs, including randomized ones for testing and seeding.
//!
//! The engine is pure: it performs no I/O and expects the caller to supply
//! an already-built [`SpecificationTable`] (the companion
//! `iso-iban-registry` crate ships the ISO 13616 registry in ready-to-use
//! form). The table is immutable after construction and safely shared by any
//! number of IBANs.
//!
//! # Example
//!
//! ```
//! use iso_iban::{FieldRange, Iban, Specification, SpecificationTable};
//!
//! let mut table = SpecificationTable::new();
//! table.insert(Specification::new(
//!     "Switzerland", "CH", "CH2!n5!n12!c", 21, "5!n12!c", 17,
//!     Some(FieldRange::new(4, 8)), None,
//! )?);
//!
//! let iban = Iban::parse(&table, "CH35 1234 5987 6543 2109 A");
//! assert!(iban.is_valid());
//! assert_eq!(iban.compact(), "CH351234598765432109A");
//! assert_eq!(iban.bank_code(), Some("12345"));
//! assert_eq!(iban.account_code(), "98765432109A");
//!
//! let generated = Iban::generate(&table, "CH", &["123", "9876B"])?;
//! assert_eq!(generated.formatted(), "CH76 0012 3000 0000 9876 B");
//! # Ok::<(), iso_iban::IbanError>(())
//! ```

pub mod checksum;
pub mod error;
pub mod iban;
pub mod specification;
pub mod structure;

pub use error::{IbanError, ValidationError};
pub use iban::{Iban, IbanDraft};
pub use specification::{FieldRange, Specification, SpecificationTable};
pub use structure::{CharClass, Structure, StructureToken};

/// Result type for IBAN operations.
pub type Result<T> = std::result::Result<T, IbanError>;
