//! SQLite database configuration.

use serde::Deserialize;

/// Location and pool sizing for the SQLite database.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
    /// How long a connection waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "agenda.db".into(),
            max_connections: 5,
            busy_timeout_ms: 5000,
        }
    }
}
