//! Runtime configuration, read from the environment at startup.

use std::env;
use std::str::FromStr;

use tracing::warn;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,
    /// SQLx connection string, e.g. `sqlite:habits.db`
    pub database_url: String,
    /// Lifetime of issued sessions
    pub session_ttl_days: i64,
}

impl Config {
    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            port: env_parse("HABITS_PORT", 3000),
            database_url: env::var("HABITS_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:habits.db".to_string()),
            session_ttl_days: env_parse("HABITS_SESSION_TTL_DAYS", 30),
        }
    }
}

/// Parse an environment variable, keeping the default on failure
fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Ignoring unparseable {}: {}", name, value);
                default
            }
        },
        Err(_) => default,
    }
}
