//! Browser views: list, create and edit pages.
//!
//! Forms post back to the server; successful writes answer with
//! `303 See Other` to the list, failures re-render the page with a visible
//! error and the status the JSON API would have used.

pub mod pages;

use actix_web::error::{InternalError, UrlencodedError};
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::ports::{UsersCommand, UsersQuery};
use crate::domain::{Error, ErrorCode, UserDraft, UserId};
use crate::inbound::http::error::{redact_if_internal, status_for};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_user_id, user_validation_error};

use self::pages::{FormMode, FormValues};

/// Urlencoded body posted by the create and edit forms.
///
/// Missing fields decode as empty strings so they surface as validation
/// messages rather than extractor errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
    /// Submitted name, untrimmed.
    #[serde(default)]
    pub name: String,
    /// Submitted email, untrimmed.
    #[serde(default)]
    pub email: String,
}

impl From<UserForm> for FormValues {
    fn from(form: UserForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
        }
    }
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn visible_message(error: &Error) -> String {
    if matches!(error.code(), ErrorCode::InternalError) {
        warn!(error = %error, "user view hit an internal error");
    }
    redact_if_internal(error).message().to_owned()
}

/// Redirect the site root to the list view.
#[get("/")]
pub async fn index() -> HttpResponse {
    see_other("/users")
}

async fn render_list(state: &HttpState, banner: Option<&Error>) -> HttpResponse {
    let banner_message = banner.map(visible_message);
    let banner_status = banner.map_or(StatusCode::OK, |err| status_for(err.code()));

    match state.users_query.list_users().await {
        Ok(users) => html(
            banner_status,
            pages::list_page(&users, banner_message.as_deref()),
        ),
        Err(err) => {
            let message = visible_message(&err);
            html(
                status_for(err.code()),
                pages::list_page(&[], Some(banner_message.as_deref().unwrap_or(&message))),
            )
        }
    }
}

/// List view.
#[get("/users")]
pub async fn list_view(state: web::Data<HttpState>) -> HttpResponse {
    render_list(&state, None).await
}

/// Empty create form.
#[get("/users/new")]
pub async fn new_view() -> HttpResponse {
    html(
        StatusCode::OK,
        pages::form_page(FormMode::Create, &FormValues::default(), None),
    )
}

fn form_failure(mode: FormMode, values: FormValues, error: &Error) -> HttpResponse {
    if let (FormMode::Edit(_), ErrorCode::NotFound) = (mode, error.code()) {
        return html(
            StatusCode::NOT_FOUND,
            pages::not_found_page(&visible_message(error)),
        );
    }
    html(
        status_for(error.code()),
        pages::form_page(mode, &values, Some(&visible_message(error))),
    )
}

fn draft_from_form(form: &UserForm) -> Result<UserDraft, Error> {
    UserDraft::try_from_strings(form.name.clone(), form.email.clone())
        .map_err(user_validation_error)
}

/// Create form submission.
#[post("/users")]
pub async fn create_submit(
    state: web::Data<HttpState>,
    form: web::Form<UserForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let result = match draft_from_form(&form) {
        Ok(draft) => state.users_command.create_user(draft).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(_) => see_other("/users"),
        Err(err) => form_failure(FormMode::Create, form.into(), &err),
    }
}

fn not_found_response(error: &Error) -> HttpResponse {
    html(
        StatusCode::NOT_FOUND,
        pages::not_found_page(&visible_message(error)),
    )
}

/// Pre-filled edit form.
#[get("/users/{id}/edit")]
pub async fn edit_view(state: web::Data<HttpState>, path: web::Path<String>) -> HttpResponse {
    let id = match parse_user_id(&path) {
        Ok(id) => id,
        Err(err) => return not_found_response(&err),
    };
    match state.users_query.get_user(id).await {
        Ok(user) => html(
            StatusCode::OK,
            pages::form_page(FormMode::Edit(id), &FormValues::from(&user), None),
        ),
        Err(err) if err.code() == ErrorCode::NotFound => not_found_response(&err),
        Err(err) => html(
            status_for(err.code()),
            pages::not_found_page(&visible_message(&err)),
        ),
    }
}

async fn apply_update(state: &HttpState, id: UserId, form: &UserForm) -> Result<(), Error> {
    let draft = draft_from_form(form)?;
    state.users_command.update_user(id, draft).await?;
    Ok(())
}

/// Edit form submission.
#[post("/users/{id}")]
pub async fn edit_submit(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<UserForm>,
) -> HttpResponse {
    let id = match parse_user_id(&path) {
        Ok(id) => id,
        Err(err) => return not_found_response(&err),
    };
    let form = form.into_inner();
    match apply_update(&state, id, &form).await {
        Ok(()) => see_other("/users"),
        Err(err) => form_failure(FormMode::Edit(id), form.into(), &err),
    }
}

/// Delete button submission. The list is re-fetched on failure.
#[post("/users/{id}/delete")]
pub async fn delete_submit(state: web::Data<HttpState>, path: web::Path<String>) -> HttpResponse {
    let result = match parse_user_id(&path) {
        Ok(id) => state.users_command.delete_user(id).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(()) => see_other("/users"),
        Err(err) => render_list(&state, Some(&err)).await,
    }
}

/// Answer unreadable form bodies with the form page instead of a bare 400.
///
/// Registered through `web::FormConfig::error_handler`; the edit form is
/// chosen when the route carries a valid id.
pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected form payload");
    let mode = req
        .match_info()
        .get("id")
        .and_then(|raw| parse_user_id(raw).ok())
        .map_or(FormMode::Create, FormMode::Edit);
    let response = html(
        StatusCode::BAD_REQUEST,
        pages::form_page(
            mode,
            &FormValues::default(),
            Some("The form submission could not be read. Please try again."),
        ),
    );
    InternalError::from_response(err, response).into()
}

/// Register the browser routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(form_error_handler))
        .service(index)
        .service(list_view)
        .service(new_view)
        .service(create_submit)
        .service(edit_view)
        .service(edit_submit)
        .service(delete_submit);
}

#[cfg(test)]
mod tests;
