//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Database settings are provided as
//! discrete keys (`DB_HOST`, `DB_PORT`, ...) rather than a single URL.

use std::net::SocketAddr;

/// Top-level service configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// MySQL server hostname.
    pub db_host: String,

    /// MySQL server port.
    pub db_port: u16,

    /// Database name.
    pub db_name: String,

    /// Database user.
    pub db_user: String,

    /// Database password.
    pub db_password: String,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Timeout in seconds for acquiring a database connection from the
    /// pool when all connections are checked out.
    pub database_acquire_timeout_secs: u64,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let db_host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let db_port = parse_env("DB_PORT", 3306);
        let db_name = std::env::var("DB_NAME").unwrap_or_else(|_| "registro".to_string());
        let db_user = std::env::var("DB_USER").unwrap_or_else(|_| "registro".to_string());
        let db_password = std::env::var("DB_PASSWORD").unwrap_or_default();

        let database_max_connections = parse_env("DATABASE_MAX_CONNECTIONS", 10);
        let database_acquire_timeout_secs = parse_env("DATABASE_ACQUIRE_TIMEOUT_SECS", 30);

        Ok(Self {
            listen_addr,
            db_host,
            db_port,
            db_name,
            db_user,
            db_password,
            database_max_connections,
            database_acquire_timeout_secs,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
