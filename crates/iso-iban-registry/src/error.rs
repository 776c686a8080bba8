//! Registry loading errors.

use iso_iban::IbanError;
use miette::Diagnostic;
use thiserror::Error;

/// Errors produced while loading a specification table.
#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    /// The specification data could not be read.
    #[error("failed to read specification data")]
    #[diagnostic(code(registry::io))]
    Io(#[from] std::io::Error),

    /// The specification JSON could not be deserialized.
    #[error("malformed specification JSON")]
    #[diagnostic(code(registry::json))]
    Json(#[from] serde_json::Error),

    /// The source parsed, but yielded no usable specification at all.
    #[error("the registry contained no usable specifications")]
    #[diagnostic(code(registry::empty))]
    Empty,

    /// A specification row was malformed or inconsistent.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Specification(#[from] IbanError),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
