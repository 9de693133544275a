//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed user documents using Diesel ORM
//! - **memory**: process-local user documents for local runs and tests
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
