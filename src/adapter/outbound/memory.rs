//! In-memory persona store.
//!
//! Backs tests and `serve --ephemeral`. Uniqueness is checked and the
//! write applied under one write lock, so it holds under concurrency.

use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{id::PersonaId, persona::Persona, persona::PersonaInput};
use crate::error::{Error, Result};
use crate::port::outbound::store::PersonaStore;

#[derive(Debug, Default)]
struct MemoryState {
    personas: BTreeMap<PersonaId, Persona>,
    last_id: i64,
}

impl MemoryState {
    fn email_taken_by_other(&self, email: &str, id: Option<PersonaId>) -> bool {
        self.personas
            .values()
            .any(|p| p.email == email && Some(p.id) != id)
    }
}

/// In-memory store. IDs start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryPersonaStore {
    state: RwLock<MemoryState>,
}

impl MemoryPersonaStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersonaStore for MemoryPersonaStore {
    async fn find_by_id(&self, id: PersonaId) -> Result<Option<Persona>> {
        Ok(self.state.read().personas.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Persona>> {
        Ok(self
            .state
            .read()
            .personas
            .values()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Persona>> {
        Ok(self.state.read().personas.values().cloned().collect())
    }

    async fn insert(&self, input: &PersonaInput) -> Result<Persona> {
        let mut state = self.state.write();
        if state.email_taken_by_other(input.email(), None) {
            return Err(Error::DuplicateEmail {
                email: input.email().to_string(),
            });
        }

        state.last_id += 1;
        let persona = Persona::from_input(PersonaId::new(state.last_id), input, Utc::now());
        state.personas.insert(persona.id, persona.clone());
        Ok(persona)
    }

    async fn update(&self, id: PersonaId, input: &PersonaInput) -> Result<Option<Persona>> {
        let mut state = self.state.write();
        if !state.personas.contains_key(&id) {
            return Ok(None);
        }
        if state.email_taken_by_other(input.email(), Some(id)) {
            return Err(Error::DuplicateEmail {
                email: input.email().to_string(),
            });
        }

        Ok(state.personas.get_mut(&id).map(|persona| {
            persona.apply(input, Utc::now());
            persona.clone()
        }))
    }

    async fn delete_by_id(&self, id: PersonaId) -> Result<bool> {
        Ok(self.state.write().personas.remove(&id).is_some())
    }
}
