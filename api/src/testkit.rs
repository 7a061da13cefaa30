//! In-memory doubles for the transport and the session store, plus fixtures.
//!
//! Used by this crate's unit tests and by the client and CLI crates' tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::{AuthError, TransportError};
use crate::session::{lock, SessionBroadcast, SessionEvent, SessionListener, SessionStore, Subscription};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::types::{Document, OAuthProvider, Session, SessionUser, User, UserMetadata};

// =============================================================================
// TRANSPORT
// =============================================================================

type Handler = Box<dyn Fn(&HttpRequest) -> Option<HttpResponse> + Send + Sync>;

struct CannedRoute {
    method: Method,
    path: String,
    responses: VecDeque<HttpResponse>,
}

#[derive(Default)]
struct TransportState {
    routes: Vec<CannedRoute>,
    handler: Option<Handler>,
    requests: Vec<HttpRequest>,
    failure: Option<TransportError>,
}

/// Records every request and answers from canned responses.
///
/// Routes match on method plus URL path (query included). A route with
/// several queued responses serves them in order and then keeps repeating
/// the last one. Unmatched requests get `404 {"detail":"Not Found"}`.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<TransportState>>,
}

impl MemoryTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method path`.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: serde_json::Value) -> &Self {
        let response = HttpResponse::new(status, body.to_string());
        let mut state = lock(&self.state);
        if let Some(route) = state.routes.iter_mut().find(|r| r.method == method && r.path == path) {
            route.responses.push_back(response);
        } else {
            state.routes.push(CannedRoute { method, path: path.to_owned(), responses: VecDeque::from([response]) });
        }
        self
    }

    /// Answer requests with `handler` before consulting canned routes.
    pub fn handle(&self, handler: impl Fn(&HttpRequest) -> Option<HttpResponse> + Send + Sync + 'static) -> &Self {
        lock(&self.state).handler = Some(Box::new(handler));
        self
    }

    /// Make every following request fail before reaching a server.
    pub fn fail_with(&self, error: TransportError) {
        lock(&self.state).failure = Some(error);
    }

    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.state).requests.clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        lock(&self.state).requests.len()
    }

    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.state).requests.last().cloned()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MemoryTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = lock(&self.state);
        state.requests.push(request.clone());
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        if let Some(response) = state.handler.as_ref().and_then(|handler| handler(&request)) {
            return Ok(response);
        }

        let path = path_of(&request.url);
        let route = state.routes.iter_mut().find(|r| r.method == request.method && r.path == path);
        let response = match route {
            Some(route) if route.responses.len() > 1 => route.responses.pop_front(),
            Some(route) => route.responses.front().cloned(),
            None => None,
        };
        Ok(response.unwrap_or_else(|| HttpResponse::new(404, r#"{"detail":"Not Found"}"#)))
    }
}

/// Path plus query of an absolute or relative URL.
#[must_use]
pub fn path_of(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(url) => match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_owned(),
        },
        Err(_) => raw.to_owned(),
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

#[derive(Default)]
struct StoreState {
    session: Option<Session>,
    fetch_failure: Option<AuthError>,
    oauth_requests: Vec<(OAuthProvider, String)>,
    password: Option<(String, String)>,
    sign_out_calls: usize,
}

/// Session store double: the session is whatever the test sets.
#[derive(Default)]
pub struct MemorySessionStore {
    state: Mutex<StoreState>,
    broadcast: SessionBroadcast,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new(session: Option<Session>) -> Self {
        let store = Self::default();
        lock(&store.state).session = session;
        store
    }

    /// Replace the session and notify subscribers.
    pub fn set_session(&self, session: Option<Session>) {
        let event = if session.is_some() { SessionEvent::SignedIn } else { SessionEvent::SignedOut };
        lock(&self.state).session.clone_from(&session);
        self.broadcast.notify(event, session.as_ref());
    }

    /// Make the next `current_session` call fail.
    pub fn fail_next_fetch(&self, error: AuthError) {
        lock(&self.state).fetch_failure = Some(error);
    }

    /// Credentials that `sign_in_with_password` accepts.
    pub fn accept_password(&self, email: &str, password: &str) {
        lock(&self.state).password = Some((email.to_owned(), password.to_owned()));
    }

    #[must_use]
    pub fn oauth_requests(&self) -> Vec<(OAuthProvider, String)> {
        lock(&self.state).oauth_requests.clone()
    }

    #[must_use]
    pub fn sign_out_calls(&self) -> usize {
        lock(&self.state).sign_out_calls
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.broadcast.listener_count()
    }
}

#[async_trait::async_trait(?Send)]
impl SessionStore for MemorySessionStore {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let mut state = lock(&self.state);
        if let Some(error) = state.fetch_failure.take() {
            return Err(error);
        }
        Ok(state.session.clone())
    }

    fn on_session_change(&self, listener: SessionListener) -> Subscription {
        self.broadcast.subscribe(listener)
    }

    async fn sign_in_with_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<(), AuthError> {
        lock(&self.state).oauth_requests.push((provider, redirect_to.to_owned()));
        Ok(())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let accepted = lock(&self.state).password.as_ref().is_some_and(|(e, p)| e == email && p == password);
        if !accepted {
            return Err(AuthError::InvalidCredentials);
        }
        let session = self::session("pw-user", email);
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        lock(&self.state).sign_out_calls += 1;
        self.set_session(None);
        Ok(())
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

/// A non-expiring session for `email`.
#[must_use]
pub fn session(user_id: &str, email: &str) -> Session {
    Session {
        access_token: format!("token-{user_id}"),
        token_type: "bearer".to_owned(),
        expires_at: None,
        refresh_token: Some(format!("refresh-{user_id}")),
        user: SessionUser {
            id: user_id.to_owned(),
            email: Some(email.to_owned()),
            user_metadata: UserMetadata { full_name: None },
        },
    }
}

#[must_use]
pub fn user(id: i64, name: &str, email: &str) -> User {
    User { id, name: name.to_owned(), email: email.to_owned(), ..User::default() }
}

#[must_use]
pub fn document(id: i64, name: &str, doc_type: &str) -> Document {
    Document {
        id,
        name: name.to_owned(),
        doc_type: doc_type.to_owned(),
        size: None,
        status: None,
        uploaded_at: None,
        created_at: None,
        updated_at: None,
        deleted_at: None,
    }
}
