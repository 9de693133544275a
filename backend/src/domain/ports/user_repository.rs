//! Port abstraction for user document persistence and its errors.
//!
//! The [`UserRepository`] stores whole user documents, embedded bank
//! accounts included. Every write is conditioned on the revision the caller
//! read, so two concurrent read-modify-write cycles cannot both commit.

use async_trait::async_trait;

use crate::domain::{User, UserId};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// No document is stored under the identifier.
    #[error("user document not found: {id}")]
    NotFound { id: String },
    /// The stored revision differs from the one the write was based on.
    #[error("revision mismatch: expected {expected}, found {actual}")]
    RevisionMismatch { expected: u64, actual: u64 },
}

impl UserPersistenceError {
    /// The store could not be reached.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// A statement failed or its result could not be decoded.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// No document exists under `id`.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// A write based on `expected` found the document at `actual`.
    pub fn revision_mismatch(expected: u64, actual: u64) -> Self {
        Self::RevisionMismatch { expected, actual }
    }
}

/// Port for user document storage.
///
/// # Revision Semantics
///
/// - New documents are inserted at the revision they carry, normally 1.
/// - [`UserRepository::replace`] and [`UserRepository::remove`] succeed only
///   when the stored revision equals `expected_revision`; otherwise they fail
///   with [`UserPersistenceError::RevisionMismatch`].
/// - The caller sets `user.revision()` to `expected_revision + 1` before
///   calling `replace`. Adapters store the revision they are given.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a document by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch every document in creation order.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Store a new document. A duplicate identifier is a `Query` error.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Replace the whole document if it is still at `expected_revision`.
    async fn replace(&self, user: &User, expected_revision: u64)
    -> Result<(), UserPersistenceError>;

    /// Delete the document if it is still at `expected_revision`.
    async fn remove(&self, id: &UserId, expected_revision: u64)
    -> Result<(), UserPersistenceError>;
}
