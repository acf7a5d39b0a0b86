//! Inbound adapters translating external requests into domain service calls.
//!
//! [`http`] serves the JSON API and operational endpoints; [`ui`] serves the
//! browser views. Both depend only on the driving ports.

pub mod http;
pub mod ui;
