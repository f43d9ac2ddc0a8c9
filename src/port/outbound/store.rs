//! Persistence port for persona records.

use std::future::Future;

use crate::domain::{id::PersonaId, persona::Persona, persona::PersonaInput};
use crate::error::Result;

/// Storage operations for personas.
///
/// Implementations own the email uniqueness constraint: `insert` and
/// `update` must fail with [`Error::DuplicateEmail`](crate::error::Error::DuplicateEmail)
/// when another record already holds the email, atomically with the write.
pub trait PersonaStore: Send + Sync {
    /// Get a persona by ID.
    fn find_by_id(&self, id: PersonaId) -> impl Future<Output = Result<Option<Persona>>> + Send;

    /// Get the persona holding exactly this email, if any.
    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<Option<Persona>>> + Send;

    /// List all personas ordered by ID.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Persona>>> + Send;

    /// Insert a new persona, assigning its ID and creation time.
    fn insert(&self, input: &PersonaInput) -> impl Future<Output = Result<Persona>> + Send;

    /// Overwrite the writable fields of an existing persona.
    ///
    /// Returns `None` when no persona has this ID.
    fn update(
        &self,
        id: PersonaId,
        input: &PersonaInput,
    ) -> impl Future<Output = Result<Option<Persona>>> + Send;

    /// Delete a persona by ID. Returns true if a record was removed.
    fn delete_by_id(&self, id: PersonaId) -> impl Future<Output = Result<bool>> + Send;
}
