//! Users JSON API handlers.
//!
//! ```text
//! GET    /api/v1/users
//! POST   /api/v1/users        {"name":"Ada","email":"ada@example.com"}
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id}   {"name":"Ada L.","email":"ada@example.com"}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::{UsersCommand, UsersQuery};
use crate::domain::{User, UserDraft, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DeletedSchema, ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_user_id, user_validation_error};

/// Message returned after a successful delete.
pub const USER_DELETED_MESSAGE: &str = "User deleted";

/// Request body for create and update.
///
/// Example JSON: `{"name":"Ada","email":"ada@example.com"}`
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserRequest {
    /// Display name; trimmed, 1 to 100 characters.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Email address; must be unique.
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl TryFrom<UserRequest> for UserDraft {
    type Error = UserValidationError;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        Self::try_from_strings(value.name, value.email)
    }
}

fn parse_draft(payload: web::Json<UserRequest>) -> ApiResult<UserDraft> {
    UserDraft::try_from(payload.into_inner()).map_err(user_validation_error)
}

/// List every user ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users ordered by id", body = [UserSchema]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "Created user", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_draft(payload)?;
    let user = state.users_command.create_user(draft).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path)?;
    let user = state.users_query.get_user(id).await?;
    Ok(web::Json(user))
}

/// Overwrite a user's name and email.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path)?;
    let draft = parse_draft(payload)?;
    let user = state.users_command.update_user(id, draft).await?;
    Ok(web::Json(user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = DeletedSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    state.users_command.delete_user(id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": USER_DELETED_MESSAGE })))
}

/// Register the JSON API routes and body error handling on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(crate::inbound::http::error::json_error_handler),
    )
    .service(list_users)
    .service(create_user)
    .service(get_user)
    .service(update_user)
    .service(delete_user);
}
