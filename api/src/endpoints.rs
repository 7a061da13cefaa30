//! Path table of the document API and the auth service.
//!
//! Paths are relative to the configured base URL and spelled exactly as the
//! remote side expects them (trailing slashes and typos included).

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

pub const USERS: &str = "/users/";
pub const CREATE_USER: &str = "/create_user/";
pub const CREATE_ROLE_EVENT: &str = "/create_role_evet/";
pub const DOCUMENTS: &str = "/documents";
pub const START_COMPRESSION_JOB: &str = "/inicialize_document_compresion_job/";

#[must_use]
pub fn user(id: i64) -> String {
    format!("/users/{id}")
}

#[must_use]
pub fn update_user(id: i64) -> String {
    format!("/updated_user/{id}")
}

#[must_use]
pub fn delete_user(id: i64) -> String {
    format!("/delete_user/{id}")
}

#[must_use]
pub fn documents_uploaded_by_user(id: i64) -> String {
    format!("/documents_upload_by_user/{id}")
}

#[must_use]
pub fn assign_role(role_id: i64, user_id: i64) -> String {
    format!("/add_role/{role_id}/user/{user_id}")
}

#[must_use]
pub fn document(id: i64) -> String {
    format!("/documents/{id}")
}

#[must_use]
pub fn upload_document_file(user_id: i64) -> String {
    format!("/documents/upload_document_file/{user_id}")
}

#[must_use]
pub fn update_document_info(id: i64) -> String {
    format!("/update_document_info/{id}")
}

#[must_use]
pub fn delete_document(id: i64) -> String {
    format!("/delete_document/{id}")
}

#[must_use]
pub fn document_shared_users(id: i64) -> String {
    format!("/documents/{id}/shared_by/users")
}

/// Join a base URL and an absolute path without doubling the slash.
#[must_use]
pub fn join(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

// =============================================================================
// AUTH SERVICE
// =============================================================================

pub mod auth {
    pub const PASSWORD_GRANT: &str = "/auth/v1/token?grant_type=password";
    pub const REFRESH_GRANT: &str = "/auth/v1/token?grant_type=refresh_token";
    pub const AUTHORIZE: &str = "/auth/v1/authorize";
    pub const USER: &str = "/auth/v1/user";
    pub const LOGOUT: &str = "/auth/v1/logout";
}
