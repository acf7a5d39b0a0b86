//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports ([`UserRepository`]) describe what the domain needs from
//! storage; driving ports ([`UsersQuery`], [`UsersCommand`]) are what inbound
//! adapters call. Driven ports expose strongly typed errors so adapters map
//! their failures into predictable variants.

mod macros;
mod user_repository;
mod users_command;
mod users_query;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{USER_NOT_FOUND_MESSAGE, UsersQuery};
