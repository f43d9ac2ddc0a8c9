//! Outbound (driven) ports implemented by infrastructure adapters.

pub mod store;
