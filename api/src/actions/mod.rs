//! Page actions: the UI-independent body of every page operation.
//!
//! SYSTEM CONTEXT
//! ==============
//! A page collects input, asks for confirmation where needed, and calls one
//! function here. The function validates, calls the Service Layer, logs the
//! underlying failure and returns either a [`Notice`] (success text plus an
//! optional navigation target) or an [`ActionError`] whose text is the fixed
//! inline message. The Leptos pages and the CLI render these verbatim.
//!
//! A [`Confirmation::Declined`] action returns [`Outcome::Cancelled`] without
//! touching the network.

pub mod auth;
pub mod documents;
pub mod users;


use crate::client::ApiClient;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::transport::Transport;
use crate::types::User;
use crate::validation::ValidationError;

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const USERS_PATH: &str = "/dashboard/users";
pub const MY_DOCUMENTS_PATH: &str = "/dashboard/my-documents";

/// The user's answer to a confirmation prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed { Self::Confirmed } else { Self::Declined }
    }
}

/// Success message and where to go next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub navigate_to: Option<&'static str>,
}

impl Notice {
    pub fn stay(message: impl Into<String>) -> Self {
        Self { message: message.into(), navigate_to: None }
    }

    pub fn then_go(message: impl Into<String>, path: &'static str) -> Self {
        Self { message: message.into(), navigate_to: Some(path) }
    }
}

/// Result of an action guarded by a confirmation prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Cancelled,
    Done(T),
}

/// Inline error message shown by a page.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ActionError {
    pub message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<ValidationError> for ActionError {
    fn from(err: ValidationError) -> Self {
        Self::new(err.to_string())
    }
}

/// Log `err` under `context` and replace it with the fixed `message`.
pub(crate) fn fail<E: std::fmt::Display>(context: &str, message: &str) -> impl FnOnce(E) -> ActionError {
    let context = context.to_owned();
    let message = message.to_owned();
    move |err| {
        log::error!("{context}: {err}");
        ActionError { message }
    }
}

/// API user matching the signed-in session's email, if any.
///
/// The auth service and the document API keep separate user ids; email is
/// the only key they share.
pub async fn resolve_api_user<T: Transport, S: SessionStore>(api: &ApiClient<T, S>) -> Result<Option<User>, ApiError> {
    let Some(session) = api.sessions().current_session().await? else {
        return Ok(None);
    };
    let Some(email) = session.user.email else {
        return Ok(None);
    };
    let users = api.list_users().await?;
    Ok(users.into_iter().find(|u| u.email.eq_ignore_ascii_case(&email)))
}
