//! DSN Parsing
//!
//! Turns a `user:password@net(addr)/dbname?params` descriptor into sqlx
//! connect options.

use lazy_static::lazy_static;
use regex::Regex;
use sqlx::mysql::MySqlConnectOptions;

use crate::domain::models::connection_config::Password;
use crate::domain::models::dsn::Dsn;
use crate::shared::errors::DsnParseError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3306;

lazy_static! {
    static ref NET_ADDR_REGEX: Regex = Regex::new(r"^(?P<net>[a-z0-9]*)\((?P<addr>.*)\)$").expect("valid regex");
    static ref HOST_PORT_REGEX: Regex =
        Regex::new(r"^(?:\[(?P<v6>[^\]]*)\]|(?P<host>[^:]*))(?::(?P<port>.*))?$").expect("valid regex");
}

/// Where the server is reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Tcp { host: String, port: u16 },
    Unix(String),
}

/// Session time zone requested by the `loc` parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTimeZone {
    /// Leave the server's time zone untouched
    Local,
    Named(String),
}

/// Fields of a parsed descriptor
#[derive(Clone, PartialEq, Eq)]
pub struct ParsedDsn {
    pub user: String,
    pub password: Password,
    pub address: Address,
    pub database: String,
    pub charset: Option<String>,
    pub collation: Option<String>,
    pub time_zone: SessionTimeZone,
}

impl std::fmt::Debug for ParsedDsn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedDsn")
            .field("user", &self.user)
            .field("address", &self.address)
            .field("database", &self.database)
            .field("charset", &self.charset)
            .field("collation", &self.collation)
            .field("time_zone", &self.time_zone)
            .finish_non_exhaustive()
    }
}

impl ParsedDsn {
    /// Parse a descriptor.
    ///
    /// The last `@` ends the credentials and the last `/` starts the
    /// database name, so both may appear unescaped in the password.
    /// Parameter values are URL-encoded (`loc=Asia%2FShanghai`).
    ///
    /// # Errors
    ///
    /// Returns a `DsnParseError` when the database separator is missing,
    /// the address is malformed, the network type is unknown or a
    /// parameter value is not valid URL encoding.
    pub fn parse(dsn: &str) -> Result<Self, DsnParseError> {
        let slash = dsn.rfind('/').ok_or(DsnParseError::MissingDatabase)?;
        let prefix = &dsn[..slash];
        let tail = &dsn[slash + 1..];
        let (database, params) = tail.split_once('?').unwrap_or((tail, ""));

        let (credentials, net_addr) = match prefix.rfind('@') {
            Some(at) => (&prefix[..at], &prefix[at + 1..]),
            None => ("", prefix),
        };
        let (user, password) = credentials.split_once(':').unwrap_or((credentials, ""));

        let mut parsed = Self {
            user: user.to_string(),
            password: Password::new(password),
            address: parse_address(net_addr)?,
            database: database.to_string(),
            charset: None,
            collation: None,
            time_zone: SessionTimeZone::Local,
        };

        for (key, raw) in params.split('&').filter_map(|pair| pair.split_once('=')) {
            let decoded = urlencoding::decode(raw).map_err(|_| DsnParseError::InvalidEncoding(key.to_string()))?;
            let value = &*decoded;

            match key {
                "charset" => {
                    parsed.charset = value.split(',').next().map(str::to_string);
                }
                "collation" => parsed.collation = Some(value.to_string()),
                "loc" => {
                    parsed.time_zone = match value {
                        "Local" => SessionTimeZone::Local,
                        "UTC" => SessionTimeZone::Named("+00:00".to_string()),
                        other => SessionTimeZone::Named(other.to_string()),
                    };
                }
                // sqlx always decodes temporal columns into native types
                "parseTime" => {}
                other => tracing::debug!(param = other, "Ignoring unsupported DSN parameter"),
            }
        }

        Ok(parsed)
    }

    /// Build sqlx connect options from the parsed fields
    #[must_use]
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .username(&self.user)
            .password(self.password.expose())
            .database(&self.database);

        options = match &self.address {
            Address::Tcp { host, port } => options.host(host).port(*port),
            Address::Unix(path) => options.socket(path),
        };

        if let Some(charset) = &self.charset {
            options = options.charset(charset);
        }
        if let Some(collation) = &self.collation {
            options = options.collation(collation);
        }

        match &self.time_zone {
            SessionTimeZone::Local => options.timezone(None::<String>),
            SessionTimeZone::Named(zone) => options.timezone(Some(zone.clone())),
        }
    }
}

/// Parse a descriptor straight into sqlx connect options
///
/// # Errors
///
/// Returns `sqlx::Error::Configuration` if the descriptor is malformed.
pub fn connect_options(dsn: &Dsn) -> Result<MySqlConnectOptions, sqlx::Error> {
    Ok(ParsedDsn::parse(dsn.expose())?.connect_options())
}

fn parse_address(net_addr: &str) -> Result<Address, DsnParseError> {
    let (net, addr) = if net_addr.contains('(') {
        let captures = NET_ADDR_REGEX
            .captures(net_addr)
            .ok_or(DsnParseError::UnterminatedAddress)?;
        (
            captures.name("net").map_or("", |m| m.as_str()),
            captures.name("addr").map_or("", |m| m.as_str()),
        )
    } else {
        (net_addr, "")
    };

    match net {
        "" | "tcp" => parse_host_port(addr),
        "unix" => Ok(Address::Unix(if addr.is_empty() {
            "/tmp/mysql.sock".to_string()
        } else {
            addr.to_string()
        })),
        other => Err(DsnParseError::UnknownNetwork(other.to_string())),
    }
}

fn parse_host_port(addr: &str) -> Result<Address, DsnParseError> {
    let invalid = || DsnParseError::InvalidPort(addr.to_string());
    let captures = HOST_PORT_REGEX.captures(addr).ok_or_else(invalid)?;

    let host = captures
        .name("v6")
        .or_else(|| captures.name("host"))
        .map_or("", |m| m.as_str());
    let port = match captures.name("port") {
        Some(port) => port.as_str().parse().map_err(|_| invalid())?,
        None => DEFAULT_PORT,
    };

    Ok(Address::Tcp {
        host: if host.is_empty() { DEFAULT_HOST } else { host }.to_string(),
        port,
    })
}
