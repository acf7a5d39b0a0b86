//! Driving port for reading the user directory.
//!
//! HTTP handlers and HTML views depend on this trait instead of the
//! repository so they stay free of persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Message carried by every "unknown user" error.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// Domain use-case port for directory reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user ordered by id ascending.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return one user, or a `not_found` error.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}
