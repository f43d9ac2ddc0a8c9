//! Port definitions between the application core and its adapters.
//!
//! # Modules
//!
//! - [`outbound`]: Driven ports the registry depends on (persona storage)

pub mod outbound;
