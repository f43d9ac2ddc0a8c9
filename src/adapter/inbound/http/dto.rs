//! JSON request bodies accepted by the persona API.

use serde::Deserialize;

use crate::domain::{error::DomainError, persona::PersonaInput};

/// Body of `POST /api/personas` and `PUT /api/personas/:id`.
///
/// Missing required fields are rejected by deserialization; field rules
/// are applied when converting into [`PersonaInput`].
#[derive(Debug, Clone, Deserialize)]
pub struct PersonaRequest {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
}

impl TryFrom<PersonaRequest> for PersonaInput {
    type Error = DomainError;

    fn try_from(request: PersonaRequest) -> Result<Self, Self::Error> {
        PersonaInput::try_new(
            request.nombre,
            request.apellido,
            request.email,
            request.telefono,
            request.direccion,
        )
    }
}
