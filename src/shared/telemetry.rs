//! Tracing Setup
//!
//! Installs the global subscriber that receives application and query logs.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "tailormade_db=info,sqlx=info";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `filter`. `ansi` only applies to the
/// plain text format.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(filter: &str, json: bool, ansi: bool) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());
    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().with_ansi(ansi)).try_init()
    }
}
