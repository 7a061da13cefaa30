use serde_json::json;

use super::*;
use crate::actions::mod_test::{api, serve_users};
use crate::transport::Method;
use crate::validation::ValidationError;

fn valid_draft() -> UserDraft {
    UserDraft {
        name: "Bo".to_owned(),
        email: "bo@example.com".to_owned(),
        phone: "5551234".to_owned(),
        responsability: "Ops".to_owned(),
        password: "secret".to_owned(),
        confirm_password: "secret".to_owned(),
    }
}

#[test]
fn password_mismatch_wins_over_missing_fields() {
    let draft = UserDraft { password: "a".to_owned(), confirm_password: "b".to_owned(), ..UserDraft::default() };
    assert_eq!(draft.validate_new(), Err(ValidationError::PasswordMismatch));
}

#[test]
fn create_requires_name_email_password_responsibility() {
    let draft = UserDraft { responsability: "  ".to_owned(), ..valid_draft() };
    assert_eq!(draft.validate_new(), Err(ValidationError::MissingRequiredFields));
    let draft = UserDraft { phone: "12ab".to_owned(), ..valid_draft() };
    assert_eq!(draft.validate_new(), Err(ValidationError::InvalidPhone));
    assert_eq!(valid_draft().validate_new().expect("valid").responsability, "Ops");
}

#[test]
fn update_skips_blank_password() {
    let draft = UserDraft { password: String::new(), confirm_password: String::new(), phone: String::new(), ..valid_draft() };
    let update = draft.validate_update().expect("valid");
    assert_eq!(update.password, None);
    assert_eq!(update.phone, None);
    assert_eq!(update.name.as_deref(), Some("Bo"));
}

#[test]
fn draft_copies_user_without_password() {
    let user = crate::types::User { role: Some("Admin".to_owned()), ..crate::testkit::user(3, "Bo", "bo@example.com") };
    let draft = UserDraft::from_user(&user);
    assert_eq!(draft.name, "Bo");
    assert!(draft.password.is_empty());
    assert_eq!(user_row(&user), "Bo (bo@example.com) - Admin");
}

#[test]
fn role_texts() {
    assert_eq!(assign_role_prompt(Role::Admin), "Are you sure you want to assign admin to this user?");
    assert_eq!(role_assigned_message(Role::User), "Role 'user' assigned successfully!");
}

#[tokio::test]
async fn mismatched_passwords_issue_no_request() {
    let (api, transport) = api(true);
    let draft = UserDraft { confirm_password: "other".to_owned(), ..valid_draft() };

    let err = create_user(&api, &draft).await.expect_err("mismatch");

    assert_eq!(err.message, "Passwords do not match.");
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn create_success_navigates_to_user_list() {
    let (api, transport) = api(true);
    transport.respond(Method::Post, "/create_user/", 200, json!({ "id": 9, "name": "Bo", "email": "bo@example.com" }));

    let notice = create_user(&api, &valid_draft()).await.expect("created");
    assert_eq!(notice, Notice::then_go(CREATED, "/dashboard/users"));
}

#[tokio::test]
async fn create_failure_shows_fixed_message() {
    let (api, transport) = api(true);
    transport.respond(Method::Post, "/create_user/", 422, json!({ "detail": "email taken" }));
    assert_eq!(create_user(&api, &valid_draft()).await.expect_err("failed").message, SAVE_FAILED);
}

#[tokio::test]
async fn update_returns_saved_user() {
    let (api, transport) = api(true);
    transport.respond(Method::Put, "/updated_user/3", 200, json!({ "id": 3, "name": "Bo B", "email": "bo@example.com" }));
    let draft = UserDraft { name: "Bo B".to_owned(), ..valid_draft() };

    let (user, notice) = update_user(&api, 3, &draft).await.expect("updated");
    assert_eq!(user.name, "Bo B");
    assert_eq!(notice.message, UPDATED);
}

#[tokio::test]
async fn declined_delete_issues_no_request() {
    let (api, transport) = api(true);
    assert_eq!(delete_user(&api, 3, Confirmation::Declined).await, Ok(Outcome::Cancelled));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn confirmed_delete_issues_one_delete_and_navigates() {
    let (api, transport) = api(true);
    transport.respond(Method::Delete, "/delete_user/3", 200, json!({ "action": "delete", "message": "ok" }));

    let outcome = delete_user(&api, 3, Confirmation::Confirmed).await.expect("deleted");

    assert_eq!(outcome, Outcome::Done(Notice::then_go(DELETED, "/dashboard/users")));
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Delete);
}

#[tokio::test]
async fn failed_delete_stays_with_message() {
    let (api, transport) = api(true);
    transport.respond(Method::Delete, "/delete_user/3", 500, json!({}));
    assert_eq!(delete_user(&api, 3, Confirmation::Confirmed).await.expect_err("failed").message, DELETE_FAILED);
}

#[tokio::test]
async fn assign_role_uses_seeded_role_id() {
    let (api, transport) = api(true);
    transport.respond(Method::Post, "/add_role/1/user/3", 200, json!({}));

    let outcome = assign_role(&api, 3, Role::Admin, Confirmation::Confirmed).await.expect("assigned");
    assert_eq!(outcome, Outcome::Done(Notice::stay("Role 'admin' assigned successfully!")));
    assert_eq!(assign_role(&api, 3, Role::Admin, Confirmation::Declined).await, Ok(Outcome::Cancelled));
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn list_failure_shows_fixed_message() {
    let (api, _transport) = api(true);
    assert_eq!(load_users(&api).await.expect_err("404").message, LOAD_USERS_FAILED);
}

#[tokio::test]
async fn list_and_get_users() {
    let (api, transport) = api(true);
    serve_users(&transport);
    transport.respond(Method::Get, "/users/3", 200, json!({ "id": 3, "name": "Bo", "email": "bo@example.com" }));

    assert_eq!(load_users(&api).await.expect("users").len(), 2);
    assert_eq!(load_user(&api, 3).await.expect("user").name, "Bo");
    assert_eq!(load_user(&api, 99).await.expect_err("missing").message, LOAD_USER_FAILED);
}
