//! Adapters connecting the application to the outside world.
//!
//! - [`inbound`] - HTTP API and command line
//! - [`outbound`] - Persona stores

pub mod inbound;
pub mod outbound;
