//! PostgreSQL persistence adapter.
//!
//! Users are stored as JSONB documents behind a revision column. Pooling uses
//! `diesel-async` with `bb8`; schema migrations are embedded in the binary.

mod diesel_user_repository;
mod document;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
