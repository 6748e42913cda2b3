//! Connection Configuration Domain Model
//!
//! Immutable description of one database target, its pool bounds and
//! its query-logging mode.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tracing::Level;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::dsn::{Dsn, DsnFormat, DsnParts};

/// Idle connections kept when no limit is configured
pub const DEFAULT_MAX_IDLE_CONNS: u32 = 10;

/// Open connections allowed when no limit is configured
pub const DEFAULT_MAX_OPEN_CONNS: u32 = 20;

/// Statements slower than this are reported when query logging is on
pub const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_secs(1);

/// Database password, wiped from memory on drop
#[derive(Clone, PartialEq, Eq, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Wrap a plaintext password
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the plaintext password
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// Requested pool bounds. `None` falls back to the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_idle_conns: Option<u32>,
    pub max_open_conns: Option<u32>,
}

impl PoolConfig {
    /// Resolve the bounds, substituting defaults for unset values.
    ///
    /// An explicit zero is kept as zero.
    #[must_use]
    pub fn limits(&self) -> PoolLimits {
        PoolLimits {
            max_idle: self.max_idle_conns.unwrap_or(DEFAULT_MAX_IDLE_CONNS),
            max_open: self.max_open_conns.unwrap_or(DEFAULT_MAX_OPEN_CONNS),
        }
    }
}

/// Pool bounds after defaults have been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolLimits {
    pub max_idle: u32,
    pub max_open: u32,
}

/// Settings for the slow-query logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLoggerConfig {
    pub slow_threshold: Duration,
    pub level: Level,
    pub colorful: bool,
}

impl Default for QueryLoggerConfig {
    fn default() -> Self {
        Self {
            slow_threshold: DEFAULT_SLOW_THRESHOLD,
            level: Level::INFO,
            colorful: true,
        }
    }
}

/// Whether executed statements are logged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryLogging {
    #[default]
    Disabled,
    Enabled(QueryLoggerConfig),
}

impl QueryLogging {
    /// Logging mode for a plain on/off switch
    #[must_use]
    pub fn from_flag(enabled: bool) -> Self {
        if enabled {
            Self::Enabled(QueryLoggerConfig::default())
        } else {
            Self::Disabled
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }
}

/// Everything needed to open one pooled connection.
///
/// The descriptor is rendered once, when the config is built. There are
/// no setters: to change a field, build a new config. Identity fields are
/// not validated; a malformed value is only rejected when the driver
/// opens the connection.
#[derive(Clone)]
pub struct ConnectionConfig {
    host: String,
    database: String,
    user: String,
    password: Password,
    logging: QueryLogging,
    pool: PoolConfig,
    format: DsnFormat,
    dsn: Dsn,
}

impl ConnectionConfig {
    /// Start building a config for `host` (`"host:port"`)
    #[must_use]
    pub fn builder(host: impl Into<String>) -> ConnectionConfigBuilder {
        ConnectionConfigBuilder {
            host: host.into(),
            database: String::new(),
            user: String::new(),
            password: Password::new(String::new()),
            logging: QueryLogging::Disabled,
            pool: PoolConfig::default(),
            format: DsnFormat::Default,
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }

    #[must_use]
    pub fn logging(&self) -> QueryLogging {
        self.logging
    }

    #[must_use]
    pub fn pool(&self) -> PoolConfig {
        self.pool
    }

    #[must_use]
    pub fn format(&self) -> &DsnFormat {
        &self.format
    }

    /// Get the descriptor rendered at construction
    #[must_use]
    pub fn dsn(&self) -> &Dsn {
        &self.dsn
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password)
            .field("logging", &self.logging)
            .field("pool", &self.pool)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ConnectionConfig`]
#[derive(Debug, Clone)]
pub struct ConnectionConfigBuilder {
    host: String,
    database: String,
    user: String,
    password: Password,
    logging: QueryLogging,
    pool: PoolConfig,
    format: DsnFormat,
}

impl ConnectionConfigBuilder {
    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Password::new(password);
        self
    }

    #[must_use]
    pub fn logging(mut self, logging: QueryLogging) -> Self {
        self.logging = logging;
        self
    }

    #[must_use]
    pub fn max_idle_conns(mut self, max_idle_conns: u32) -> Self {
        self.pool.max_idle_conns = Some(max_idle_conns);
        self
    }

    #[must_use]
    pub fn max_open_conns(mut self, max_open_conns: u32) -> Self {
        self.pool.max_open_conns = Some(max_open_conns);
        self
    }

    #[must_use]
    pub fn pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }

    #[must_use]
    pub fn format(mut self, format: DsnFormat) -> Self {
        self.format = format;
        self
    }

    /// Render the descriptor and freeze the config
    #[must_use]
    pub fn build(self) -> ConnectionConfig {
        let dsn = Dsn::render(
            &self.format,
            DsnParts {
                user: &self.user,
                password: self.password.expose(),
                host: &self.host,
                database: &self.database,
            },
        );

        ConnectionConfig {
            host: self.host,
            database: self.database,
            user: self.user,
            password: self.password,
            logging: self.logging,
            pool: self.pool,
            format: self.format,
            dsn,
        }
    }
}
