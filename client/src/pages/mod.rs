//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetch on mount, local
//! loading/error/message signals, drafts) and delegates the operation itself
//! to `api::actions`, so pages only render outcomes.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod dashboard;
pub mod document_detail;
pub mod document_upload;
pub mod home;
pub mod login;
pub mod user_detail;
pub mod user_documents;
pub mod user_list;

use api::actions::DASHBOARD_PATH;

use crate::state::auth::AuthState;

/// Where a public page sends a visitor who is already signed in.
pub(crate) fn signed_in_redirect(state: &AuthState) -> Option<&'static str> {
    state.is_authenticated().then_some(DASHBOARD_PATH)
}

/// `:id` route parameter as an API id.
pub(crate) fn route_id(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok()
}
