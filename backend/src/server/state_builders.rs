//! Selection of the user store backing the server.

use std::io;
use std::sync::Arc;

use tracing::{info, warn};

use backend::domain::ports::UserRepository;
use backend::outbound::memory::InMemoryUserRepository;
use backend::outbound::persistence::{DbPool, DieselUserRepository, run_pending_migrations};

use super::ServerSettings;

/// Select the user store: PostgreSQL when a URL is configured, otherwise a
/// process-local store whose contents vanish on exit.
///
/// # Errors
/// Returns [`io::Error`] when migrations fail or the pool cannot be built.
pub(crate) async fn build_repository(
    settings: &ServerSettings,
) -> io::Result<Arc<dyn UserRepository>> {
    let Some(url) = settings.database_url() else {
        warn!("BANK_DATABASE_URL not set; user documents are kept in memory only");
        return Ok(Arc::new(InMemoryUserRepository::new()));
    };

    if settings.run_migrations {
        run_pending_migrations(url).await.map_err(io::Error::other)?;
    }
    let config = settings.pool_config(url);
    let max_size = config.max_size();
    let pool = DbPool::new(config).await.map_err(io::Error::other)?;
    info!(max_size, "connected to PostgreSQL user store");
    Ok(Arc::new(DieselUserRepository::new(pool)))
}
