//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` so they depend only on the
//! driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::UserService;
use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP and UI handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read side: listing and lookup.
    pub users_query: Arc<dyn UsersQuery>,
    /// Write side: mutations.
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Bundle explicit port implementations.
    pub fn new(users_query: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users_query,
            users_command,
        }
    }

    /// Wire both ports to a [`UserService`] over `repository`.
    pub fn from_repository<R>(repository: Arc<R>) -> Self
    where
        R: UserRepository + 'static,
    {
        let service = Arc::new(UserService::new(repository));
        Self {
            users_query: service.clone(),
            users_command: service,
        }
    }
}
