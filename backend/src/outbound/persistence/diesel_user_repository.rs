//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Each user is one row in `user_documents`. Replace and remove are single
//! statements guarded by `revision`; when no row matches, a follow-up read
//! tells a missing document apart from a stale one.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

use super::document::UserDocument;
use super::models::{NewUserDocumentRow, UserDocumentRow, UserDocumentUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::user_documents;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::query("duplicate user id")
        }
        DieselError::SerializationError(_) | DieselError::DeserializationError(_) => {
            UserPersistenceError::query("user document could not be converted")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

fn revision_to_db(revision: u64) -> Result<i64, UserPersistenceError> {
    i64::try_from(revision)
        .map_err(|_| UserPersistenceError::query(format!("revision {revision} out of range")))
}

fn revision_from_db(revision: i64) -> Result<u64, UserPersistenceError> {
    u64::try_from(revision)
        .map_err(|_| UserPersistenceError::query(format!("stored revision {revision} is negative")))
}

fn encode_document(user: &User) -> Result<serde_json::Value, UserPersistenceError> {
    serde_json::to_value(UserDocument::from(user))
        .map_err(|err| UserPersistenceError::query(format!("encode user document: {err}")))
}

fn row_to_user(row: UserDocumentRow) -> Result<User, UserPersistenceError> {
    let revision = revision_from_db(row.revision)?;
    let document: UserDocument = serde_json::from_value(row.document).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored user document is malformed");
        UserPersistenceError::query(format!("decode user document {}: {err}", row.id))
    })?;
    Ok(document.into_user(row.id, revision))
}

/// Explain why a revision-guarded statement matched no rows.
async fn classify_missed_write<C>(
    conn: &mut C,
    id: Uuid,
    expected_revision: u64,
) -> UserPersistenceError
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let current = user_documents::table
        .filter(user_documents::id.eq(id))
        .select(user_documents::revision)
        .first::<i64>(conn)
        .await
        .optional()
        .map_err(map_diesel_error);

    match current {
        Ok(Some(actual)) => match revision_from_db(actual) {
            Ok(actual) => UserPersistenceError::revision_mismatch(expected_revision, actual),
            Err(err) => err,
        },
        Ok(None) => UserPersistenceError::not_found(id.to_string()),
        Err(err) => err,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserDocumentRow> = user_documents::table
            .filter(user_documents::id.eq(id.as_uuid()))
            .select(UserDocumentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserDocumentRow> = user_documents::table
            .order((user_documents::created_at.asc(), user_documents::id.asc()))
            .select(UserDocumentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let document = encode_document(user)?;
        let row = NewUserDocumentRow {
            id: *user.id().as_uuid(),
            revision: revision_to_db(user.revision())?,
            document: &document,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(user_documents::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn replace(
        &self,
        user: &User,
        expected_revision: u64,
    ) -> Result<(), UserPersistenceError> {
        let document = encode_document(user)?;
        let update = UserDocumentUpdate {
            revision: revision_to_db(user.revision())?,
            document: &document,
            updated_at: Utc::now(),
        };
        let expected = revision_to_db(expected_revision)?;
        let id = *user.id().as_uuid();

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated_rows = diesel::update(user_documents::table)
            .filter(
                user_documents::id
                    .eq(id)
                    .and(user_documents::revision.eq(expected)),
            )
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Err(classify_missed_write(&mut conn, id, expected_revision).await);
        }
        Ok(())
    }

    async fn remove(&self, id: &UserId, expected_revision: u64) -> Result<(), UserPersistenceError> {
        let expected = revision_to_db(expected_revision)?;
        let uuid = *id.as_uuid();

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted_rows = diesel::delete(
            user_documents::table.filter(
                user_documents::id
                    .eq(uuid)
                    .and(user_documents::revision.eq(expected)),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if deleted_rows == 0 {
            return Err(classify_missed_write(&mut conn, uuid, expected_revision).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the pure helpers; database round trips need a
    //! running PostgreSQL and are not exercised here.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, UserPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    #[case(0, Ok(0))]
    #[case(7, Ok(7))]
    fn revisions_convert_from_db(#[case] stored: i64, #[case] expected: Result<u64, ()>) {
        assert_eq!(revision_from_db(stored).map_err(|_| ()), expected);
    }

    #[rstest]
    fn negative_revision_is_rejected() {
        assert!(revision_from_db(-1).is_err());
        assert!(revision_to_db(u64::MAX).is_err());
    }

    #[rstest]
    fn row_to_user_uses_column_id_and_revision() {
        let id = Uuid::new_v4();
        let account_id = Uuid::new_v4();
        let row = UserDocumentRow {
            id,
            revision: 3,
            document: json!({
                "first_name": "Somchai",
                "last_name": "Dee",
                "username": "somchai",
                "password": "pw",
                "idcard": "1",
                "age": 50,
                "email": "s@example.com",
                "tel": "02",
                "user_bank_account": [
                    {"id": account_id, "bank_name": "BBL", "account_number": "9", "balance": 1.5}
                ]
            }),
        };

        let user = row_to_user(row).expect("row converts");

        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.revision(), 3);
        assert_eq!(user.profile().id_card, "1");
        let account = user
            .bank_accounts()
            .find_by_number("9")
            .expect("embedded account");
        assert_eq!(account.id().as_uuid(), &account_id);
    }

    #[rstest]
    fn malformed_document_is_a_query_error() {
        let row = UserDocumentRow {
            id: Uuid::new_v4(),
            revision: 1,
            document: json!({"first_name": 5}),
        };

        let err = row_to_user(row).expect_err("malformed");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
