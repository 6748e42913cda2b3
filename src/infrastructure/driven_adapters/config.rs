//! Application Configuration
//!
//! Loads configuration from files and environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::models::connection_config::{ConnectionConfig, Password, PoolConfig, QueryLogging};
use crate::domain::models::dsn::DsnFormat;
use crate::shared::telemetry::DEFAULT_FILTER;

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: Password,
    #[serde(default)]
    pub log: bool,
    #[serde(default)]
    pub max_idle_conns: Option<u32>,
    #[serde(default)]
    pub max_open_conns: Option<u32>,
    #[serde(default)]
    pub dsn_format: DsnFormat,
}

impl DatabaseConfig {
    /// Freeze into a connection config, rendering the descriptor
    #[must_use]
    pub fn to_connection_config(&self) -> ConnectionConfig {
        ConnectionConfig::builder(self.host.clone())
            .database(self.database.clone())
            .user(self.user.clone())
            .password(self.password.expose())
            .logging(QueryLogging::from_flag(self.log))
            .pool(PoolConfig {
                max_idle_conns: self.max_idle_conns,
                max_open_conns: self.max_open_conns,
            })
            .format(self.dsn_format.clone())
            .build()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
    /// Colour plain-text output
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
            ansi: default_ansi(),
        }
    }
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

fn default_ansi() -> bool {
    true
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

        Config::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(true))
            // Merge environment-specific config if it exists
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Override with environment variables (e.g., APP__DATABASE__HOST)
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .expect("Failed to build test config")
            .try_deserialize()
            .expect("Failed to deserialize test config")
    }

    #[test]
    fn should_apply_defaults_for_optional_fields() {
        let config = parse(
            r#"
[database]
host = "db:3306"
database = "app"
user = "root"
password = "secret"
"#,
        );

        assert!(!config.database.log);
        assert_eq!(config.database.max_idle_conns, None);
        assert_eq!(config.database.max_open_conns, None);
        assert_eq!(config.database.dsn_format, DsnFormat::Default);
        assert_eq!(config.logging.filter, DEFAULT_FILTER);
        assert!(!config.logging.json);
        assert!(config.logging.ansi);

        let connection = config.database.to_connection_config();
        assert_eq!(
            connection.dsn().expose(),
            "root:secret@tcp(db:3306)/app?charset=utf8&parseTime=True&loc=Local"
        );
        assert_eq!(connection.logging(), QueryLogging::Disabled);
    }

    #[test]
    fn should_read_pool_limits_logging_and_builtin_format() {
        let config = parse(
            r#"
[database]
host = "db:3306"
database = "app"
user = "root"
password = "secret"
log = true
max_idle_conns = 5
max_open_conns = 50
dsn_format = "utf8mb4"
"#,
        );

        let connection = config.database.to_connection_config();
        let limits = connection.pool().limits();

        assert_eq!(limits.max_idle, 5);
        assert_eq!(limits.max_open, 50);
        assert!(connection.logging().is_enabled());
        assert!(connection.dsn().expose().contains("charset=utf8mb4"));
    }

    #[test]
    fn should_read_custom_format() {
        let config = parse(
            r#"
[database]
host = "db:3306"
database = "app"
user = "root"
password = "secret"

[database.dsn_format]
custom = "{user}:{password}@tcp({host})/{database}?collation=utf8mb4_unicode_ci"
"#,
        );

        assert_eq!(
            config.database.to_connection_config().dsn().expose(),
            "root:secret@tcp(db:3306)/app?collation=utf8mb4_unicode_ci"
        );
    }

    #[test]
    fn should_keep_log_colour_independent_of_query_logging() {
        let config = parse(
            r#"
[database]
host = "db:3306"
database = "app"
user = "root"
password = "secret"
log = false

[logging]
ansi = true
"#,
        );

        assert!(config.logging.ansi);
        assert!(!config.database.to_connection_config().logging().is_enabled());
    }

    #[test]
    fn should_hold_password_as_redacted_secret() {
        let config = parse(
            r#"
[database]
host = "db:3306"
database = "app"
user = "root"
password = "secret"
"#,
        );

        assert_eq!(config.database.password.expose(), "secret");
        assert!(!format!("{:?}", config.database).contains("secret"));
    }
}
