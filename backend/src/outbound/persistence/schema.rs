//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations/` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Directory users.
    ///
    /// `id` is a serial primary key and `email` carries the
    /// `users_email_key` unique constraint.
    users (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
    }
}
