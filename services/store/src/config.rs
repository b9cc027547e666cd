//! Server configuration loaded from environment variables
//!
//! # Environment Variables
//!
//! - `STORE_HOST` - Bind address (default: 0.0.0.0)
//! - `STORE_PORT` - Listen port (default: 8000)
//!
//! Database and token settings live with their modules
//! (`common::database::DatabaseConfig`, `crate::jwt::JwtConfig`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Load server configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = match std::env::var("STORE_HOST") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("STORE_HOST".to_string(), format!("{e}")))?,
            Err(_) => defaults.host,
        };

        let port = match std::env::var("STORE_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("STORE_PORT".to_string(), format!("{e}")))?,
            Err(_) => defaults.port,
        };

        Ok(Self { host, port })
    }

    /// Address the listener binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
