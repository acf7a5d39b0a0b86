//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the JSON API and health endpoints together with the
//! schema wrappers from [`crate::inbound::http::schemas`], keeping domain
//! types free of utoipa derives. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it.

use crate::inbound::http::schemas::{DeletedSchema, ErrorCodeSchema, ErrorSchema, UserSchema};
use crate::inbound::http::users::UserRequest;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "CRUD operations on user records and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserSchema, UserRequest, ErrorSchema, ErrorCodeSchema, DeletedSchema)),
    tags(
        (name = "users", description = "Operations on user records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
