//! Driving port for changing the user directory.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Domain use-case port for directory writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Persist a new user; a taken email yields a `conflict` error.
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error>;

    /// Replace name and email of an existing user.
    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, Error>;

    /// Remove a user; unknown ids yield a `not_found` error.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
