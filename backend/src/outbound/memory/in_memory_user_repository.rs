//! Process-local `UserRepository` used when no database is configured.
//!
//! Documents live in insertion order behind a mutex and follow the same
//! revision rules as the PostgreSQL adapter, so services behave identically
//! against either store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

/// Mutex-guarded, insertion-ordered user document store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    documents: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn documents(&self) -> Result<MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.documents
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory store lock poisoned"))
    }
}

fn position_at_revision(
    documents: &[User],
    id: &UserId,
    expected_revision: u64,
) -> Result<usize, UserPersistenceError> {
    let position = documents
        .iter()
        .position(|stored| stored.id() == id)
        .ok_or_else(|| UserPersistenceError::not_found(id.as_ref()))?;
    let actual = documents
        .get(position)
        .map_or(expected_revision, User::revision);
    if actual != expected_revision {
        return Err(UserPersistenceError::revision_mismatch(
            expected_revision,
            actual,
        ));
    }
    Ok(position)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let documents = self.documents()?;
        Ok(documents.iter().find(|stored| stored.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.documents()?.clone())
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut documents = self.documents()?;
        if documents.iter().any(|stored| stored.id() == user.id()) {
            return Err(UserPersistenceError::query(format!(
                "duplicate user id: {}",
                user.id()
            )));
        }
        documents.push(user.clone());
        Ok(())
    }

    async fn replace(
        &self,
        user: &User,
        expected_revision: u64,
    ) -> Result<(), UserPersistenceError> {
        let mut documents = self.documents()?;
        let position = position_at_revision(&documents, user.id(), expected_revision)?;
        if let Some(slot) = documents.get_mut(position) {
            *slot = user.clone();
        }
        Ok(())
    }

    async fn remove(&self, id: &UserId, expected_revision: u64) -> Result<(), UserPersistenceError> {
        let mut documents = self.documents()?;
        let position = position_at_revision(&documents, id, expected_revision)?;
        documents.remove(position);
        Ok(())
    }
}
