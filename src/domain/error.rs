//! Domain validation errors.
//!
//! Returned by [`PersonaInput::try_new`](super::persona::PersonaInput::try_new)
//! when submitted contact data breaks a field rule.
//!
//! # Examples
//!
//! ```
//! use agenda::domain::error::DomainError;
//! use agenda::domain::persona::PersonaInput;
//!
//! let result = PersonaInput::try_new("", "Diaz", "ana@x.com", None, None);
//! assert!(matches!(result, Err(DomainError::EmptyField { field: "nombre" })));
//! ```

use thiserror::Error;

/// Errors raised when persona input violates a field rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was empty or whitespace only.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A field exceeded its column width.
    #[error("{field} must be at most {max} characters, got {len}")]
    FieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum allowed length in characters.
        max: usize,
        /// Submitted length in characters.
        len: usize,
    },

    /// The email address is not of the form `local@domain.tld`.
    #[error("invalid email address: {email}")]
    InvalidEmail {
        /// The rejected address.
        email: String,
    },
}
