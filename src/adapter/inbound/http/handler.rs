//! Persona endpoint handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::dto::PersonaRequest;
use super::error::ApiError;
use crate::application::registry::ContactRegistry;
use crate::domain::{id::PersonaId, persona::Persona, persona::PersonaInput};
use crate::port::outbound::store::PersonaStore;

/// Registry shared across request tasks.
pub type SharedRegistry<S> = Arc<ContactRegistry<S>>;

type ApiResult<T> = Result<T, ApiError>;

fn persona_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<PersonaId> {
    let Path(id) = path?;
    Ok(PersonaId::new(id))
}

fn persona_input(body: Result<Json<PersonaRequest>, JsonRejection>) -> ApiResult<PersonaInput> {
    let Json(request) = body?;
    Ok(PersonaInput::try_from(request)?)
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `POST /api/personas`
pub async fn create_persona<S: PersonaStore + 'static>(
    State(registry): State<SharedRegistry<S>>,
    body: Result<Json<PersonaRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Persona>)> {
    let input = persona_input(body)?;
    let persona = registry.create(&input).await?;
    Ok((StatusCode::CREATED, Json(persona)))
}

/// `GET /api/personas`
pub async fn list_personas<S: PersonaStore + 'static>(
    State(registry): State<SharedRegistry<S>>,
) -> ApiResult<Json<Vec<Persona>>> {
    Ok(Json(registry.list_all().await?))
}

/// `GET /api/personas/:id`
pub async fn get_persona<S: PersonaStore + 'static>(
    State(registry): State<SharedRegistry<S>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Persona>> {
    let id = persona_id(path)?;
    Ok(Json(registry.get_by_id(id).await?))
}

/// `PUT /api/personas/:id`
pub async fn update_persona<S: PersonaStore + 'static>(
    State(registry): State<SharedRegistry<S>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<PersonaRequest>, JsonRejection>,
) -> ApiResult<Json<Persona>> {
    let id = persona_id(path)?;
    let input = persona_input(body)?;
    Ok(Json(registry.update(id, &input).await?))
}

/// `DELETE /api/personas/:id`
pub async fn delete_persona<S: PersonaStore + 'static>(
    State(registry): State<SharedRegistry<S>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = persona_id(path)?;
    registry.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
