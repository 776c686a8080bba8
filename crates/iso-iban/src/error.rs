//! Error types for IBAN processing.
//!
//! Two families, kept deliberately separate:
//!
//! - [`ValidationError`]: enumerable data-quality findings. Produced by
//!   [`Iban::validate`](crate::Iban::validate), never raised; a caller sees
//!   every defect of an IBAN at once.
//! - [`IbanError`]: hard failures such as malformed specifications (fatal at load
//!   time), unmappable characters handed to the checksum engine, and misuse
//!   of the generation APIs.

use miette::Diagnostic;
use thiserror::Error;

/// A single validation finding for an IBAN.
///
/// Returned (possibly several at a time) by
/// [`Iban::validate`](crate::Iban::validate), in the fixed order the variants
/// are declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    /// The compact form contains characters outside `[A-Z]{2}(\d\d|\?\?)[A-Z0-9]*`.
    #[error("invalid characters")]
    InvalidCharacters,
    /// The 2-letter country code is not present in the specification table.
    #[error("invalid country")]
    InvalidCountry,
    /// The numeric rearrangement of the IBAN is not congruent to 1 mod 97.
    #[error("invalid checksum")]
    InvalidChecksum,
    /// The compact form does not have the length the country specifies.
    #[error("invalid length")]
    InvalidLength,
    /// The compact form does not match the country's structure.
    #[error("invalid format")]
    InvalidFormat,
}

/// Errors produced by the IBAN engine.
#[derive(Debug, Error, Diagnostic)]
pub enum IbanError {
    /// A structure descriptor does not conform to the SWIFT grammar.
    #[error("malformed structure descriptor '{descriptor}' at offset {position}")]
    #[diagnostic(code(iban::malformed_structure))]
    MalformedStructure {
        /// The offending descriptor.
        descriptor: String,
        /// Byte offset of the first unusable character.
        position: usize,
    },

    /// A specification violates a load-time invariant.
    #[error("inconsistent specification for '{country}': {detail}")]
    #[diagnostic(code(iban::inconsistent_specification))]
    InconsistentSpecification {
        /// The 2-letter country code of the specification.
        country: String,
        /// Which invariant was violated.
        detail: String,
    },

    /// A character with no numeric transliteration was handed to the
    /// checksum engine.
    #[error("the character {character:?} has no numeric IBAN form")]
    #[diagnostic(code(iban::invalid_character))]
    InvalidCharacter {
        /// The unmappable character.
        character: char,
    },

    /// The requested country is not in the specification table.
    #[error("no specification known for country '{country}'")]
    #[diagnostic(code(iban::unknown_country))]
    UnknownCountry {
        /// The requested 2-letter country code.
        country: String,
    },

    /// `generate` was called with the wrong number of components.
    #[error("country '{country}' takes {expected} component(s), got {actual}")]
    #[diagnostic(code(iban::component_count))]
    ComponentCount {
        /// The 2-letter country code.
        country: String,
        /// Number of components the specification defines.
        expected: usize,
        /// Number of components supplied.
        actual: usize,
    },

    /// A component handed to `generate` is longer than its field.
    ///
    /// Components are never silently truncated; shorter components are
    /// zero-left-padded instead.
    #[error("component {index} for country '{country}' is {actual} character(s) long, field takes at most {expected}")]
    #[diagnostic(code(iban::component_length))]
    ComponentLength {
        /// The 2-letter country code.
        country: String,
        /// Zero-based index of the offending component.
        index: usize,
        /// The field width.
        expected: usize,
        /// Length of the supplied component.
        actual: usize,
    },

    /// `random` was asked to pick from an empty specification table.
    #[error("the specification table is empty")]
    #[diagnostic(code(iban::empty_table))]
    EmptyTable,

    /// A strict parse rejected the IBAN.
    #[error("the IBAN {formatted} is invalid ({})", join_errors(.errors))]
    #[diagnostic(code(iban::invalid))]
    Invalid {
        /// The rejected IBAN in its formatted form.
        formatted: String,
        /// Every validation finding, in evaluation order.
        errors: Vec<ValidationError>,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    let mut out = String::new();
    for (i, error) in errors.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&error.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_lists_every_finding() {
        let error = IbanError::Invalid {
            formatted: "XX35 1234".to_string(),
            errors: vec![
                ValidationError::InvalidCountry,
                ValidationError::InvalidChecksum,
                ValidationError::InvalidLength,
            ],
        };
        assert_eq!(
            error.to_string(),
            "the IBAN XX35 1234 is invalid (invalid country, invalid checksum, invalid length)"
        );
    }

    #[test]
    fn test_component_length_message_names_the_field() {
        let error = IbanError::ComponentLength {
            country: "CH".to_string(),
            index: 1,
            expected: 12,
            actual: 13,
        };
        assert!(error.to_string().contains("component 1"));
        assert!(error.to_string().contains("at most 12"));
    }
}
