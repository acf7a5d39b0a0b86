//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::ports::USER_NOT_FOUND_MESSAGE;
use crate::domain::{Error, UserId, UserValidationError};

/// Map a domain validation failure to an `invalid_request` payload naming
/// the offending field.
pub(crate) fn user_validation_error(err: UserValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

/// Parse a path segment into a [`UserId`].
///
/// Unparsable and non-positive ids cannot name a stored user, so they are
/// reported as not found.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<UserId>()
        .map_err(|_| Error::not_found(USER_NOT_FOUND_MESSAGE))
}
