//! HTTP API adapter.
//!
//! Exposes the contact registry over REST:
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | `POST` | `/api/personas` | 201 + persona |
//! | `GET` | `/api/personas` | 200 + list |
//! | `GET` | `/api/personas/:id` | 200 + persona |
//! | `PUT` | `/api/personas/:id` | 200 + persona |
//! | `DELETE` | `/api/personas/:id` | 204 |
//! | `GET` | `/health` | 200 |

pub mod dto;
pub mod error;
pub mod handler;
mod middleware;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::application::registry::ContactRegistry;
use crate::port::outbound::store::PersonaStore;

/// Build the API router over a shared registry.
pub fn build_router<S: PersonaStore + 'static>(
    registry: Arc<ContactRegistry<S>>,
    max_body_bytes: usize,
) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route(
            "/api/personas",
            get(handler::list_personas::<S>).post(handler::create_persona::<S>),
        )
        .route(
            "/api/personas/:id",
            get(handler::get_persona::<S>)
                .put(handler::update_persona::<S>)
                .delete(handler::delete_persona::<S>),
        )
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(registry)
}
