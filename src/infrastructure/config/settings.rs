//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file, with environment variable
//! overrides for deployment-specific values (`AGENDA_BIND`, `AGENDA_DATABASE`).
//!
//! # Example
//!
//! ```no_run
//! use agenda::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::database::DatabaseConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding [`ServerConfig::bind`].
pub const BIND_ENV: &str = "AGENDA_BIND";
/// Environment variable overriding [`DatabaseConfig::path`].
pub const DATABASE_ENV: &str = "AGENDA_DATABASE";

/// Main application configuration.
///
/// Every section is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(bind) = std::env::var(BIND_ENV) {
            config.server.bind = bind;
        }
        if let Ok(path) = std::env::var(DATABASE_ENV) {
            config.database.path = path;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load configuration from a TOML file, or use defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.server.bind.is_empty() {
            return Err(ConfigError::MissingField { field: "bind" }.into());
        }
        if let Err(e) = self.server.bind.parse::<SocketAddr>() {
            return Err(ConfigError::InvalidValue {
                field: "bind",
                reason: e.to_string(),
            }
            .into());
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_body_bytes",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "path" }.into());
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_connections",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            return Err(ConfigError::InvalidValue {
                field: "level",
                reason: e.to_string(),
            }
            .into());
        }
        if !LoggingConfig::FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {}", LoggingConfig::FORMATS.join(", ")),
            }
            .into());
        }
        Ok(())
    }

    /// Socket address parsed from [`ServerConfig::bind`].
    ///
    /// # Errors
    ///
    /// Returns an error if the bind address is not a valid socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server.bind.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidValue {
                field: "bind",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.server.max_body_bytes, 64 * 1024);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
[server]
bind = "0.0.0.0:9000"

[database]
path = "/var/lib/agenda/agenda.db"
max_connections = 8

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().port(), 9000);
        assert_eq!(config.database.path, "/var/lib/agenda/agenda.db");
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn rejects_unparseable_bind() {
        let result = Config::parse_toml("[server]\nbind = \"localhost\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "bind", .. }))
        ));
    }

    #[test]
    fn rejects_zero_connections() {
        let result = Config::parse_toml("[database]\nmax_connections = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "max_connections",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = Config::parse_toml("[logging]\nformat = \"xml\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "format", .. }))
        ));
    }

    #[test]
    fn rejects_unparseable_log_level() {
        let result = Config::parse_toml("[logging]\nlevel = \"!!!not a filter\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "level", .. }))
        ));
    }

    #[test]
    fn accepts_directive_log_level() {
        let config =
            Config::parse_toml("[logging]\nlevel = \"info,agenda=debug\"\n").unwrap();
        assert_eq!(config.logging.level, "info,agenda=debug");
    }

    #[test]
    fn rejects_malformed_toml() {
        let result = Config::parse_toml("[server\nbind = 1");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }
}
