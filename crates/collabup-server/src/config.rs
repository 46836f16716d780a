//! Server configuration
//!
//! Command-line options with environment fallbacks.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use clap::Parser;

/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default bind port
pub const DEFAULT_PORT: u16 = 8000;
/// Requests served at once before callers queue
pub const DEFAULT_MAX_CONCURRENCY: usize = 50;

/// Configuration errors
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Host/port pair does not resolve to a socket address
    #[error("Invalid bind address '{host}:{port}': {reason}")]
    InvalidAddress {
        host: String,
        port: u16,
        reason: String,
    },
    /// Concurrency limit must allow at least one request
    #[error("max concurrency must be at least 1")]
    ZeroConcurrency,
}

/// CollabUp recommendation server
#[derive(Debug, Clone, Parser)]
#[command(name = "collabup-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "HTTP recommendation service for CollabUp")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "COLLABUP_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "COLLABUP_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Record database path (defaults to the platform data directory)
    #[arg(long, env = "COLLABUP_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Maximum number of requests handled concurrently
    #[arg(long, env = "COLLABUP_MAX_CONCURRENCY", default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Emit logs as JSON lines
    #[arg(long, env = "COLLABUP_JSON_LOGS")]
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: None,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            json_logs: false,
        }
    }
}

impl ServerConfig {
    /// Check option combinations clap cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        self.socket_addr().map(|_| ())
    }

    /// Resolve host and port to the address to bind
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidAddress {
            host: self.host.clone(),
            port: self.port,
            reason,
        };

        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("no addresses found".to_string()))
    }
}
