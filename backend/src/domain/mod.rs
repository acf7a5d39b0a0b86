//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed user model and the use-cases inbound
//! adapters call. Nothing in here knows about HTTP or Diesel.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `User`, `UserDraft`, `UserId`, `UserName`, `EmailAddress`: the model.
//! - `UserService`: implementation of the `UsersQuery`/`UsersCommand` ports.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, User, UserDraft, UserId, UserName, UserValidationError};
pub use self::user_service::{DUPLICATE_EMAIL_MESSAGE, UserService};
