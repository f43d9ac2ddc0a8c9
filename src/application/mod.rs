//! Application services (use cases).
//!
//! These services apply the contact rules and delegate storage to the
//! outbound ports.

pub mod registry;
