//! User directory library modules.
//!
//! Hexagonal layout: [`domain`] holds the model and use-cases, [`inbound`]
//! the HTTP and HTML adapters, [`outbound`] the repositories.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use doc::ApiDoc;
pub use middleware::Trace;
