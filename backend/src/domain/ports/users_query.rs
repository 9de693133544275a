//! Driving port for user-facing queries.
//!
//! Inbound adapters use this port to read user documents without importing
//! outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every stored user in creation order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// The user stored under `id`, or a `NotFound` error.
    async fn find_user(&self, id: &UserId) -> Result<User, Error>;
}
