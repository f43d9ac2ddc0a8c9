//! Canonical test configurations.

use std::path::Path;

use crate::infrastructure::config::settings::Config;

/// Configuration bound to an ephemeral local port with the database at `db_path`.
pub fn config_with_database(db_path: &Path) -> Config {
    let mut config = Config::default();
    config.server.bind = "127.0.0.1:0".to_string();
    config.database.path = db_path.display().to_string();
    config.database.max_connections = 4;
    config
}
