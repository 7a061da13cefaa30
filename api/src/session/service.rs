//! Session store backed by a hosted GoTrue-style auth service.
//!
//! DESIGN
//! ======
//! All traffic goes through the injected [`Transport`]; persistence, clock and
//! the OAuth hand-off are injected too, so the whole lifecycle (password
//! grant, OAuth redirect completion, refresh on expiry, revocation) runs in
//! unit tests without a browser.
//!
//! ERROR HANDLING
//! ==============
//! A refresh rejected by the service ends the session (listeners get
//! `SignedOut`). A refresh that fails to reach the service, or that the
//! service answers with a 5xx, keeps the stored session and surfaces the
//! error, so a network blip or an auth-service outage does not log the user
//! out.

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;

use serde::Deserialize;

use super::{SessionBroadcast, SessionEvent, SessionListener, SessionPersistence, SessionStore, Subscription};
use crate::config::Endpoints;
use crate::endpoints::{self, auth};
use crate::error::AuthError;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::types::{OAuthProvider, Session, SessionUser};

/// Starts the OAuth hand-off by sending the browser to the given URL.
pub type RedirectFn = Box<dyn Fn(&str) -> Result<(), AuthError> + Send + Sync>;

/// Current time as unix seconds.
pub type ClockFn = fn() -> i64;

pub struct AuthServiceStore<T, P> {
    transport: T,
    persistence: P,
    auth_url: String,
    auth_key: String,
    broadcast: SessionBroadcast,
    clock: ClockFn,
    redirect: RedirectFn,
}

impl<T: Transport, P: SessionPersistence> AuthServiceStore<T, P> {
    pub fn new(transport: T, persistence: P, endpoints: &Endpoints) -> Self {
        Self {
            transport,
            persistence,
            auth_url: endpoints.auth_url.clone(),
            auth_key: endpoints.auth_key.clone(),
            broadcast: SessionBroadcast::new(),
            clock: system_clock,
            redirect: Box::new(|_| Err(AuthError::Redirect("no redirect handler installed".to_owned()))),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: ClockFn) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_redirect(mut self, redirect: impl Fn(&str) -> Result<(), AuthError> + Send + Sync + 'static) -> Self {
        self.redirect = Box::new(redirect);
        self
    }

    /// Provider authorize URL the browser is sent to.
    pub fn authorize_url(&self, provider: OAuthProvider, redirect_to: &str) -> Result<String, AuthError> {
        self.ensure_configured()?;
        let base = endpoints::join(&self.auth_url, auth::AUTHORIZE);
        let url = url::Url::parse_with_params(&base, &[("provider", provider.as_str()), ("redirect_to", redirect_to)])
            .map_err(|e| AuthError::Redirect(e.to_string()))?;
        Ok(url.into())
    }

    /// Finish an OAuth round trip from the URL fragment the provider sent the
    /// browser back with. Returns `Ok(None)` when the fragment carries no tokens.
    pub async fn complete_redirect(&self, fragment: &str) -> Result<Option<Session>, AuthError> {
        let params = RedirectParams::parse(fragment);
        if let Some(message) = params.error {
            return Err(AuthError::Rejected { status: 400, message });
        }
        let Some(access_token) = params.access_token else {
            return Ok(None);
        };
        self.ensure_configured()?;

        let request = self.request(Method::Get, auth::USER).bearer(Some(&access_token));
        let response = self.transport.send(request).await?;
        let user: SessionUser = decode(&response)?;

        let now = (self.clock)();
        let session = Session {
            access_token,
            token_type: params.token_type.unwrap_or_else(|| "bearer".to_owned()),
            expires_at: params.expires_at.or(params.expires_in.map(|secs| now + secs)),
            refresh_token: params.refresh_token,
            user,
        };
        self.persistence.save(&session);
        log::info!("auth: signed in via redirect user={}", session.user.id);
        self.broadcast.notify(SessionEvent::SignedIn, Some(&session));
        Ok(Some(session))
    }

    fn ensure_configured(&self) -> Result<(), AuthError> {
        if self.auth_url.is_empty() || self.auth_key.is_empty() {
            return Err(AuthError::NotConfigured);
        }
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> HttpRequest {
        HttpRequest::new(method, endpoints::join(&self.auth_url, path)).header("apikey", self.auth_key.clone())
    }

    async fn grant(&self, path: &str, body: serde_json::Value) -> Result<Session, AuthError> {
        self.ensure_configured()?;
        let response = self.transport.send(self.request(Method::Post, path).json(body)).await?;
        let token: TokenResponse = decode(&response)?;
        Ok(token.into_session((self.clock)()))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        self.grant(auth::REFRESH_GRANT, serde_json::json!({ "refresh_token": refresh_token })).await
    }

    fn end_session(&self) {
        self.persistence.clear();
        self.broadcast.notify(SessionEvent::SignedOut, None);
    }
}

#[async_trait::async_trait(?Send)]
impl<T: Transport, P: SessionPersistence> SessionStore for AuthServiceStore<T, P> {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.persistence.load() else {
            return Ok(None);
        };
        if !session.is_expired_at((self.clock)()) {
            return Ok(Some(session));
        }

        let Some(refresh_token) = session.refresh_token.as_deref() else {
            log::info!("auth: session expired without refresh token");
            self.end_session();
            return Ok(None);
        };
        match self.refresh(refresh_token).await {
            Ok(fresh) => {
                self.persistence.save(&fresh);
                self.broadcast.notify(SessionEvent::TokenRefreshed, Some(&fresh));
                Ok(Some(fresh))
            }
            Err(e) if is_outage(&e) => {
                log::warn!("auth: token refresh unavailable: {e}");
                Err(e)
            }
            Err(e) => {
                log::warn!("auth: token refresh rejected: {e}");
                self.end_session();
                Ok(None)
            }
        }
    }

    fn on_session_change(&self, listener: SessionListener) -> Subscription {
        self.broadcast.subscribe(listener)
    }

    async fn sign_in_with_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<(), AuthError> {
        let url = self.authorize_url(provider, redirect_to)?;
        log::info!("auth: oauth hand-off provider={provider}");
        (self.redirect)(&url)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let session = self.grant(auth::PASSWORD_GRANT, body).await?;
        self.persistence.save(&session);
        self.broadcast.notify(SessionEvent::SignedIn, Some(&session));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.persistence.load() else {
            self.end_session();
            return Ok(());
        };

        let revoked = if self.ensure_configured().is_ok() {
            let request = self.request(Method::Post, auth::LOGOUT).bearer(Some(&session.access_token));
            match self.transport.send(request).await {
                // An already-invalid token counts as revoked.
                Ok(response) if response.is_success() || matches!(response.status, 401 | 404) => Ok(()),
                Ok(response) => Err(rejection(&response)),
                Err(e) => Err(AuthError::Transport(e)),
            }
        } else {
            Ok(())
        };

        self.end_session();
        if let Err(e) = &revoked {
            log::warn!("auth: sign-out revocation failed: {e}");
        }
        revoked
    }
}

// =============================================================================
// WIRE
// =============================================================================

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    user: SessionUser,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> Session {
        Session {
            access_token: self.access_token,
            token_type: self.token_type.unwrap_or_else(|| "bearer".to_owned()),
            expires_at: self.expires_at.or(self.expires_in.map(|secs| now + secs)),
            refresh_token: self.refresh_token,
            user: self.user,
        }
    }
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn rejection(response: &HttpResponse) -> AuthError {
    let body: ErrorBody = serde_json::from_str(&response.body).unwrap_or_default();
    let invalid_grant = body.error.as_deref() == Some("invalid_grant");
    let message = body
        .error_description
        .or(body.msg)
        .or(body.message)
        .or(body.error)
        .unwrap_or_else(|| response.body.clone());
    if response.status == 400 && (invalid_grant || message.to_ascii_lowercase().contains("invalid login credentials")) {
        return AuthError::InvalidCredentials;
    }
    AuthError::Rejected { status: response.status, message }
}

/// Failures that say nothing about the refresh token itself: the service was
/// unreachable or answered with a server error.
fn is_outage(err: &AuthError) -> bool {
    match err {
        AuthError::Transport(_) => true,
        AuthError::Rejected { status, .. } => *status >= 500,
        _ => false,
    }
}

fn decode<D: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<D, AuthError> {
    if !response.is_success() {
        return Err(rejection(response));
    }
    response.json().map_err(AuthError::Decode)
}

#[derive(Default)]
struct RedirectParams {
    access_token: Option<String>,
    token_type: Option<String>,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    refresh_token: Option<String>,
    error: Option<String>,
}

impl RedirectParams {
    fn parse(fragment: &str) -> Self {
        let raw = fragment.trim_start_matches('#');
        let mut params = Self::default();
        let mut error_code = None;
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "access_token" => params.access_token = Some(value),
                "token_type" => params.token_type = Some(value),
                "expires_in" => params.expires_in = value.parse().ok(),
                "expires_at" => params.expires_at = value.parse().ok(),
                "refresh_token" => params.refresh_token = Some(value),
                "error_description" => params.error = Some(value),
                "error" => error_code = Some(value),
                _ => {}
            }
        }
        if params.error.is_none() {
            params.error = error_code;
        }
        params
    }
}

fn system_clock() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}
