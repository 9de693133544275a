//! Embedded schema migrations.
//!
//! The SQL under `backend/migrations` is compiled into the binary and applied
//! on a dedicated synchronous connection before the pool is built.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The migration connection could not be opened.
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking migration task did not finish.
    #[error("migration task aborted: {message}")]
    Aborted { message: String },
}

fn run_blocking(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(applied.len())
}

/// Apply every pending migration against `database_url`.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a
/// migration fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_blocking(&url))
        .await
        .map_err(|err| MigrationError::Aborted {
            message: err.to_string(),
        })??;
    info!(applied, "database migrations up to date");
    Ok(())
}
