//! Driving port for user document mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserPatch, UserProfile};

/// Domain use-case port for creating, updating, and deleting users.
///
/// Update and delete take the document already loaded by the caller so the
/// write is conditioned on the revision that was authenticated against.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate `profile`, assign a fresh id, and store a new document with
    /// no bank accounts.
    async fn create_user(&self, profile: UserProfile) -> Result<User, Error>;

    /// Apply `patch` sparsely and return the merged document.
    async fn update_user(&self, user: User, patch: UserPatch) -> Result<User, Error>;

    /// Delete `user` and return the removed snapshot.
    async fn delete_user(&self, user: User) -> Result<User, Error>;
}
