//! Port abstraction for user persistence adapters and their errors.
//!
//! The repository owns the `users` table contract: generated ids, a unique
//! email column and id-ordered listing. Adapters translate their native
//! failures into [`UserPersistenceError`] so the domain never sees driver
//! types.

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// No row matches the identifier of an update or delete.
        NotFound { id: UserId } => "user {id} does not exist",
        /// The email unique constraint rejected the write.
        DuplicateEmail { email: String } => "email {email} is already in use",
    }
}

/// Storage contract for directory users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every user ordered by id ascending.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new row and return it with its generated identifier.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the email is
    /// already stored.
    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Overwrite name and email of an existing row.
    ///
    /// Fails with [`UserPersistenceError::NotFound`] when `id` has no row.
    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Remove a row.
    ///
    /// Fails with [`UserPersistenceError::NotFound`] when `id` has no row, so
    /// repeated deletes are observable.
    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError>;
}
