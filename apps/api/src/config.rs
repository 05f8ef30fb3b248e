//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stockroom_db::DbConfig;

/// Which [`ProductStore`](stockroom_db::ProductStore) the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// SQLite file at `database_path`
    Sqlite,
    /// Process memory; contents vanish on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::InvalidValue("STORE_BACKEND".to_string())),
        }
    }
}

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Interface to bind
    pub bind_addr: IpAddr,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size for the SQLite backend
    pub db_max_connections: u32,

    /// Seconds a request waits for a pooled connection
    pub db_connect_timeout_secs: u64,

    /// Storage backend
    pub store_backend: StoreBackend,

    /// Default tracing filter; `RUST_LOG` wins when set
    pub log_filter: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BIND_ADDR".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./stockroom.db".to_string())
                .into(),

            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            db_connect_timeout_secs: env::var("DB_CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_CONNECT_TIMEOUT_SECS".to_string()))?,

            store_backend: env::var("STORE_BACKEND")
                .unwrap_or_else(|_| "sqlite".to_string())
                .parse()?,

            log_filter: env::var("LOG_FILTER")
                .unwrap_or_else(|_| "info,stockroom=debug".to_string()),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        if config.db_connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("DB_CONNECT_TIMEOUT_SECS".to_string()));
        }

        Ok(config)
    }

    /// Pool settings for the SQLite backend.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone())
            .max_connections(self.db_max_connections)
            .connect_timeout(Duration::from_secs(self.db_connect_timeout_secs))
    }

    /// Address the HTTP listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
