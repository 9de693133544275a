//! Diesel row structs for the `user_documents` table.
//!
//! These types are internal to the persistence adapter and never cross into
//! the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::user_documents;

/// Row struct for reading from the `user_documents` table.
///
/// Timestamps stay in the database; only ordering uses `created_at`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserDocumentRow {
    pub id: Uuid,
    pub revision: i64,
    pub document: serde_json::Value,
}

/// Insertable struct for creating user documents.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_documents)]
pub(crate) struct NewUserDocumentRow<'a> {
    pub id: Uuid,
    pub revision: i64,
    pub document: &'a serde_json::Value,
}

/// Changeset struct for whole-document replaces.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = user_documents)]
pub(crate) struct UserDocumentUpdate<'a> {
    pub revision: i64,
    pub document: &'a serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
