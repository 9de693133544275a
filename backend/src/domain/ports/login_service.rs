//! Driving port for basic-authentication checks.
//!
//! In hexagonal terms this is a *driving* port: the HTTP adapter calls it to
//! authenticate the user named in the request path without knowing which
//! store backs it.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Load the user under `id` and check `credentials` against it.
    ///
    /// An unknown id and a credential mismatch both fail with
    /// `Unauthorized`, so callers cannot probe which ids exist.
    async fn authenticate(&self, id: &UserId, credentials: &LoginCredentials)
    -> Result<User, Error>;
}
