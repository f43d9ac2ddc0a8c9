//! Contact registry service.
//!
//! Enforces email uniqueness and maps missing records to
//! [`Error::NotFound`] before delegating to a [`PersonaStore`].

use tracing::{debug, info, warn};

use crate::domain::{id::PersonaId, persona::Persona, persona::PersonaInput};
use crate::error::{Error, Result};
use crate::port::outbound::store::PersonaStore;

/// Create, read, update and delete operations over personas.
///
/// The email lookup performed here gives callers a precise error. The
/// store's own uniqueness constraint stays authoritative, so two racing
/// writers that both pass the lookup still cannot both commit.
pub struct ContactRegistry<S> {
    store: S,
}

impl<S: PersonaStore> ContactRegistry<S> {
    /// Create a registry over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Store a new persona.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateEmail`] if any persona already holds the email.
    pub async fn create(&self, input: &PersonaInput) -> Result<Persona> {
        if self.store.find_by_email(input.email()).await?.is_some() {
            warn!(email = %input.email(), "Rejected create with duplicate email");
            return Err(Error::DuplicateEmail {
                email: input.email().to_string(),
            });
        }

        let persona = self.store.insert(input).await?;
        info!(id = %persona.id, email = %persona.email, "Persona created");
        Ok(persona)
    }

    /// List every stored persona.
    ///
    /// # Errors
    ///
    /// Returns an error only when the store fails.
    pub async fn list_all(&self) -> Result<Vec<Persona>> {
        let personas = self.store.find_all().await?;
        debug!(count = personas.len(), "Listed personas");
        Ok(personas)
    }

    /// Fetch one persona.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no persona has this ID.
    pub async fn get_by_id(&self, id: PersonaId) -> Result<Persona> {
        debug!(id = %id, "Fetching persona");
        self.store
            .find_by_id(id)
            .await?
            .ok_or(Error::NotFound { id })
    }

    /// Replace the writable fields of an existing persona.
    ///
    /// Keeping the current email never counts as a duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the ID is absent, or
    /// [`Error::DuplicateEmail`] if another persona holds the new email.
    pub async fn update(&self, id: PersonaId, input: &PersonaInput) -> Result<Persona> {
        let current = self.get_by_id(id).await?;

        if current.email != input.email() {
            if let Some(holder) = self.store.find_by_email(input.email()).await? {
                if holder.id != id {
                    warn!(
                        id = %id,
                        holder = %holder.id,
                        email = %input.email(),
                        "Rejected update with duplicate email"
                    );
                    return Err(Error::DuplicateEmail {
                        email: input.email().to_string(),
                    });
                }
            }
        }

        let persona = self
            .store
            .update(id, input)
            .await?
            .ok_or(Error::NotFound { id })?;
        info!(id = %id, email = %persona.email, "Persona updated");
        Ok(persona)
    }

    /// Remove a persona.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no persona has this ID.
    pub async fn delete(&self, id: PersonaId) -> Result<()> {
        if !self.store.delete_by_id(id).await? {
            return Err(Error::NotFound { id });
        }
        info!(id = %id, "Persona deleted");
        Ok(())
    }
}
