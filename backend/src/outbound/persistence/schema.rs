//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a migration
//! changes the schema, regenerate with `diesel print-schema` or edit by hand.

diesel::table! {
    /// One row per user document.
    ///
    /// The profile and the embedded bank account list live together in the
    /// `document` JSONB column so every write replaces them atomically.
    user_documents (id) {
        /// Primary key: UUID v4 user identifier.
        id -> Uuid,
        /// Optimistic concurrency counter, starting at 1.
        revision -> Int8,
        /// Profile fields and embedded bank accounts.
        document -> Jsonb,
        /// Record creation timestamp; also the listing order.
        created_at -> Timestamptz,
        /// Last replace timestamp.
        updated_at -> Timestamptz,
    }
}
