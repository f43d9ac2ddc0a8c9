//! Agenda - a contact directory served over HTTP.
//!
//! Stores personas (name, surname, email, optional phone and address) and
//! exposes CRUD operations over a JSON REST API. Email addresses are unique
//! across all stored personas.
//!
//! # Architecture
//!
//! - **`domain`** - Persona types and field validation
//! - **`port`** - The [`PersonaStore`](port::outbound::store::PersonaStore) trait
//! - **`application`** - [`ContactRegistry`](application::registry::ContactRegistry),
//!   the use cases and the email uniqueness rule
//! - **`adapter`** - SQLite and in-memory stores, HTTP router and CLI
//! - **`infrastructure`** - Configuration loading and server bootstrap
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use agenda::adapter::inbound::http::build_router;
//! use agenda::adapter::outbound::memory::MemoryPersonaStore;
//! use agenda::application::registry::ContactRegistry;
//!
//! let registry = Arc::new(ContactRegistry::new(MemoryPersonaStore::new()));
//! let router = build_router(registry, 64 * 1024);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
