//! Server settings loaded via OrthoConfig, and the resolved server config.

use std::net::SocketAddr;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::domain::ports::UserRepository;
use backend::outbound::persistence::{DEFAULT_MAX_SIZE, PoolConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:1323";

/// Settings read from `BANK_*` environment variables and CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BANK")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to port 1323.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Pool settings for `database_url`.
    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        PoolConfig::new(database_url).with_max_size(self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE))
    }
}

/// Everything `create_server` needs once settings are resolved.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) repository: Arc<dyn UserRepository>,
}

impl ServerConfig {
    /// Bundle a resolved bind address with the selected user store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, repository: Arc<dyn UserRepository>) -> Self {
        Self {
            bind_addr,
            repository,
        }
    }
}
