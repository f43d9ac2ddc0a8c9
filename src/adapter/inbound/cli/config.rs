//! Handler for the `config` command group.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;

    output::section("Server");
    output::field("Bind", &config.server.bind);
    output::field("Max body bytes", config.server.max_body_bytes);

    output::section("Database");
    output::field("Path", &config.database.path);
    output::field("Max connections", config.database.max_connections);
    output::field("Busy timeout", format!("{} ms", config.database.busy_timeout_ms));

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    Config::load(path)?;
    output::success(&format!("{} is valid", path.display()));
    Ok(())
}
