//! HTTP inbound adapter exposing the JSON API and health probes.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;
