//! Tests for the browser views.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockUsersCommand, MockUsersQuery, UsersCommand, UsersQuery};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryUserRepository;

struct Harness {
    state: HttpState,
}

impl Harness {
    fn new() -> Self {
        Self {
            state: HttpState::from_repository(Arc::new(InMemoryUserRepository::new())),
        }
    }

    async fn seed(&self, name: &str, email: &str) -> UserId {
        let draft = UserDraft::try_from_strings(name, email).expect("valid draft");
        self.state
            .users_command
            .create_user(draft)
            .await
            .expect("seed user")
            .id()
    }
}

fn app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
}

async fn send(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Option<String>, String) {
    let service = actix_test::init_service(app(state)).await;
    let response = actix_test::call_service(&service, request.to_request()).await;
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = actix_test::read_body(response).await;
    let body = String::from_utf8(body.to_vec()).expect("utf8 body");
    (status, location, body)
}

fn form(name: &str, email: &str) -> [(&'static str, String); 2] {
    [("name", name.to_owned()), ("email", email.to_owned())]
}

#[rstest]
#[actix_web::test]
async fn root_redirects_to_list() {
    let (status, location, _) = send(Harness::new().state, actix_test::TestRequest::get().uri("/")).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/users"));
}

#[rstest]
#[actix_web::test]
async fn list_shows_users_in_id_order() {
    let harness = Harness::new();
    harness.seed("Ada", "ada@example.com").await;
    harness.seed("Bob", "bob@example.com").await;

    let (status, _, body) = send(harness.state, actix_test::TestRequest::get().uri("/users")).await;

    assert_eq!(status, StatusCode::OK);
    let ada = body.find("ada@example.com").expect("ada listed");
    let bob = body.find("bob@example.com").expect("bob listed");
    assert!(ada < bob);
    assert!(body.contains("/users/1/edit"));
}

#[rstest]
#[actix_web::test]
async fn create_form_has_required_inputs() {
    let (status, _, body) =
        send(Harness::new().state, actix_test::TestRequest::get().uri("/users/new")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("action=\"/users\""));
    assert_eq!(body.matches("required").count(), 2);
}

#[rstest]
#[actix_web::test]
async fn create_submission_redirects_and_persists() {
    let harness = Harness::new();
    let state = harness.state.clone();

    let (status, location, _) = send(
        harness.state,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_form(form("Ada", "ada@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/users"));
    let users = state.users_query.list_users().await.expect("list");
    assert_eq!(users.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_re_renders_form_with_values() {
    let harness = Harness::new();
    harness.seed("Ada", "ada@example.com").await;

    let (status, _, body) = send(
        harness.state,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_form(form("Second Ada", "ada@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("email already in use"));
    assert!(body.contains("value=\"Second Ada\""));
}

#[rstest]
#[actix_web::test]
async fn invalid_submission_is_a_bad_request() {
    let (status, _, body) = send(
        Harness::new().state,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_form([("name", "Ada")]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("email must not be empty"));
}

#[rstest]
#[actix_web::test]
async fn unreadable_create_body_re_renders_the_form() {
    let (status, _, body) = send(
        Harness::new().state,
        actix_test::TestRequest::post()
            .uri("/users")
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("name=Ada"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("class=\"error\""));
    assert!(body.contains("could not be read"));
    assert!(body.contains("action=\"/users\""));
}

#[rstest]
#[actix_web::test]
async fn unreadable_edit_body_re_renders_the_edit_form() {
    let harness = Harness::new();
    let id = harness.seed("Ada", "ada@example.com").await;

    let (status, _, body) = send(
        harness.state,
        actix_test::TestRequest::post()
            .uri(&format!("/users/{id}"))
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(r#"{"name":"Ada"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("could not be read"));
    assert!(body.contains(&format!("action=\"/users/{id}\"")));
}

#[rstest]
#[actix_web::test]
async fn edit_view_prefills_the_form() {
    let harness = Harness::new();
    let id = harness.seed("Ada", "ada@example.com").await;

    let (status, _, body) = send(
        harness.state,
        actix_test::TestRequest::get().uri(&format!("/users/{id}/edit")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("value=\"Ada\""));
    assert!(body.contains(&format!("action=\"/users/{id}\"")));
}

#[rstest]
#[case("/users/42/edit")]
#[case("/users/nope/edit")]
#[actix_web::test]
async fn edit_view_for_unknown_id_is_not_found(#[case] uri: &str) {
    let (status, _, body) = send(Harness::new().state, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("User not found"));
}

#[rstest]
#[actix_web::test]
async fn edit_submission_updates_and_redirects() {
    let harness = Harness::new();
    let id = harness.seed("Ada", "ada@example.com").await;
    let state = harness.state.clone();

    let (status, location, _) = send(
        harness.state,
        actix_test::TestRequest::post()
            .uri(&format!("/users/{id}"))
            .set_form(form("Ada L.", "ada@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/users"));
    let user = state.users_query.get_user(id).await.expect("user");
    assert_eq!(user.name().as_ref(), "Ada L.");
}

#[rstest]
#[actix_web::test]
async fn delete_submission_removes_the_row() {
    let harness = Harness::new();
    let id = harness.seed("Ada", "ada@example.com").await;
    let state = harness.state.clone();

    let (status, location, _) = send(
        harness.state,
        actix_test::TestRequest::post().uri(&format!("/users/{id}/delete")),
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/users"));
    assert!(state.users_query.list_users().await.expect("list").is_empty());
}

#[rstest]
#[actix_web::test]
async fn failed_delete_re_renders_list_with_banner() {
    let harness = Harness::new();
    harness.seed("Ada", "ada@example.com").await;

    let (status, _, body) = send(
        harness.state,
        actix_test::TestRequest::post().uri("/users/99/delete"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("role=\"alert\">User not found"));
    assert!(body.contains("ada@example.com"));
}

#[rstest]
#[actix_web::test]
async fn unavailable_repository_is_shown_on_the_list() {
    let mut query = MockUsersQuery::new();
    query
        .expect_list_users()
        .times(1)
        .returning(|| Err(Error::service_unavailable("database unavailable")));
    let state = HttpState::new(Arc::new(query), Arc::new(MockUsersCommand::new()));

    let (status, _, body) = send(state, actix_test::TestRequest::get().uri("/users")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("database unavailable"));
}
