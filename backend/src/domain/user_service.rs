//! User document services.
//!
//! [`UserService`] implements the user driving ports: profile CRUD and the
//! basic-authentication check that loads the document every other operation
//! works on.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    IdGenerator, LoginService, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{Error, LoginCredentials, User, UserId, UserPatch, UserProfile};

/// Map a repository failure onto the domain error taxonomy.
pub(crate) fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::NotFound { id } => {
            Error::not_found(format!("user not found: {id}")).with_details(json!({ "userId": id }))
        }
        UserPersistenceError::RevisionMismatch { expected, actual } => {
            Error::conflict("revision mismatch").with_details(json!({
                "expectedRevision": expected,
                "actualRevision": actual,
                "code": "revision_mismatch",
            }))
        }
    }
}

/// User service implementing the user query, command, and login ports.
pub struct UserService<R: ?Sized, G: ?Sized> {
    user_repo: Arc<R>,
    ids: Arc<G>,
}

impl<R: ?Sized, G: ?Sized> UserService<R, G> {
    /// Create a new service over the given repository and id source.
    pub fn new(user_repo: Arc<R>, ids: Arc<G>) -> Self {
        Self { user_repo, ids }
    }
}

impl<R, G> UserService<R, G>
where
    R: UserRepository + ?Sized,
    G: IdGenerator + ?Sized,
{
    async fn load(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)
    }
}

#[async_trait]
impl<R, G> UsersQuery for UserService<R, G>
where
    R: UserRepository + ?Sized,
    G: IdGenerator + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo
            .find_all()
            .await
            .map_err(map_persistence_error)
    }

    async fn find_user(&self, id: &UserId) -> Result<User, Error> {
        self.load(id).await?.ok_or_else(|| {
            Error::not_found(format!("user not found: {id}"))
                .with_details(json!({ "userId": id.as_ref() }))
        })
    }
}

#[async_trait]
impl<R, G> UsersCommand for UserService<R, G>
where
    R: UserRepository + ?Sized,
    G: IdGenerator + ?Sized,
{
    async fn create_user(&self, profile: UserProfile) -> Result<User, Error> {
        if let Err(violation) = profile.validate() {
            debug!(%violation, "rejected user creation");
            return Err(violation.into());
        }

        let user = User::register(self.ids.user_id(), profile);
        self.user_repo
            .insert(&user)
            .await
            .map_err(map_persistence_error)?;

        info!(user_id = %user.id(), "created user");
        Ok(user)
    }

    async fn update_user(&self, user: User, patch: UserPatch) -> Result<User, Error> {
        let merged = user.profile().clone().merge(&patch);
        let updated = user.with_profile(merged).next_revision();
        self.user_repo
            .replace(&updated, user.revision())
            .await
            .map_err(map_persistence_error)?;

        info!(user_id = %updated.id(), revision = updated.revision(), "updated user");
        Ok(updated)
    }

    async fn delete_user(&self, user: User) -> Result<User, Error> {
        self.user_repo
            .remove(user.id(), user.revision())
            .await
            .map_err(map_persistence_error)?;

        info!(user_id = %user.id(), "deleted user");
        Ok(user)
    }
}

#[async_trait]
impl<R, G> LoginService for UserService<R, G>
where
    R: UserRepository + ?Sized,
    G: IdGenerator + ?Sized,
{
    async fn authenticate(
        &self,
        id: &UserId,
        credentials: &LoginCredentials,
    ) -> Result<User, Error> {
        match self.load(id).await? {
            Some(user) if user.accepts(credentials.username(), credentials.password()) => Ok(user),
            Some(_) => {
                debug!(user_id = %id, "credential mismatch");
                Err(Error::unauthorized("invalid credentials"))
            }
            None => {
                debug!(user_id = %id, "authentication for unknown user");
                Err(Error::unauthorized("invalid credentials"))
            }
        }
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
