//! Login page actions.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::{fail, ActionError, DASHBOARD_PATH};
use crate::auth::AuthContext;
use crate::error::AuthError;
use crate::session::SessionStore;
use crate::types::OAuthProvider;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";
pub const PASSWORD_LOGIN_FAILED: &str = "Failed to log in with email and password.";
pub const LOGOUT_FAILED: &str = "Failed to log out.";

#[must_use]
pub fn oauth_failed_message(provider: OAuthProvider) -> String {
    format!("Failed to log in with {}. Please try again.", provider.label())
}

/// Where the provider sends the browser back to.
#[must_use]
pub fn oauth_redirect_target(origin: &str) -> String {
    format!("{}{DASHBOARD_PATH}", origin.trim_end_matches('/'))
}

pub async fn sign_in_with_oauth<S: SessionStore>(
    ctx: &AuthContext<S>,
    provider: OAuthProvider,
    origin: &str,
) -> Result<(), ActionError> {
    let redirect_to = oauth_redirect_target(origin);
    ctx.sign_in_with_oauth(provider, &redirect_to)
        .await
        .map_err(fail("login: oauth", &oauth_failed_message(provider)))
}

pub async fn sign_in_with_password<S: SessionStore>(
    ctx: &AuthContext<S>,
    email: &str,
    password: &str,
) -> Result<(), ActionError> {
    match ctx.sign_in_with_password(email.trim(), password).await {
        Ok(()) => Ok(()),
        Err(AuthError::InvalidCredentials) => Err(ActionError::new(INVALID_CREDENTIALS)),
        Err(e) => Err(fail("login: password", PASSWORD_LOGIN_FAILED)(e)),
    }
}

pub async fn log_out<S: SessionStore>(ctx: &AuthContext<S>) -> Result<(), ActionError> {
    ctx.log_out().await.map_err(fail("logout", LOGOUT_FAILED))
}
