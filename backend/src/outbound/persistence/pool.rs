//! Async connection pool for the PostgreSQL user store.
//!
//! Wraps `diesel-async` and `bb8`. Checkout respects the configured timeout
//! and every failure surfaces as a [`PoolError`].

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Errors raised while building the pool or checking out a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// The pool could not be constructed.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Connection pool settings.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use backend::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://bank@localhost/bank")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

/// Default number of pooled connections.
pub const DEFAULT_MAX_SIZE: u32 = 10;

impl PoolConfig {
    /// Settings for `database_url` with [`DEFAULT_MAX_SIZE`] connections, one
    /// kept idle, and a ten second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            min_idle: Some(1),
            connection_timeout: Duration::from_secs(10),
        }
    }

    /// Cap the number of pooled connections. Zero is raised to one.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    /// Minimum idle connections to keep open.
    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// How long a checkout waits before failing.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Database URL the pool connects to.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Maximum pooled connections.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Shared handle to the connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build a pool from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the URL is malformed or the initial
    /// connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);
        let min_idle = config.min_idle.map(|idle| idle.min(config.max_size));

        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection is available within
    /// the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
