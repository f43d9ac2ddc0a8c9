//! Contact domain: persona records, identifiers and validation rules.

pub mod error;
pub mod id;
pub mod persona;

pub use error::DomainError;
pub use id::PersonaId;
pub use persona::{Persona, PersonaInput};
