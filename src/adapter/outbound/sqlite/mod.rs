//! SQLite persistence via Diesel.

pub mod database;
pub mod store;
