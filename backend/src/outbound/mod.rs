//! Outbound adapters implementing the `UserRepository` port.
//!
//! - **persistence**: PostgreSQL via Diesel.
//! - **memory**: process-local store for database-less runs and tests.

pub mod memory;
pub mod persistence;
