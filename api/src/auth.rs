//! Auth propagation: mirrors the session store into UI-facing state.
//!
//! DESIGN
//! ======
//! [`AuthContext`] subscribes to the store before fetching the initial
//! session, so a sign-in that lands while the fetch is in flight is not lost.
//! Whichever resolves first wins: a notification that arrives before the
//! initial fetch completes makes the fetch result stale, and it is dropped.
//! Once resolved, the state never returns to loading.
//!
//! The context is UI-framework agnostic. Every transition is reported to an
//! observer callback; the Leptos client writes it into an `RwSignal`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex};

use crate::error::AuthError;
use crate::session::{lock, SessionStore, Subscription};
use crate::types::{OAuthProvider, Session, SessionUser};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// Not mounted yet.
    #[default]
    Uninitialized,
    /// Initial session fetch in flight.
    Loading,
    Authenticated,
    Anonymous,
}

/// Snapshot of who is signed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub phase: AuthPhase,
    pub session: Option<Session>,
    pub user: Option<SessionUser>,
    /// True until the first resolution.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { phase: AuthPhase::Uninitialized, session: None, user: None, loading: true }
    }
}

impl AuthState {
    #[must_use]
    pub fn loading() -> Self {
        Self { phase: AuthPhase::Loading, ..Self::default() }
    }

    /// Resolved state for `session`; `user` always derives from it.
    #[must_use]
    pub fn resolved(session: Option<Session>) -> Self {
        let phase = if session.is_some() { AuthPhase::Authenticated } else { AuthPhase::Anonymous };
        let user = session.as_ref().map(|s| s.user.clone());
        Self { phase, session, user, loading: false }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, AuthPhase::Authenticated | AuthPhase::Anonymous)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    /// Bearer token of the current session.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }
}

/// Callback receiving every state transition.
pub type AuthObserver = Arc<dyn Fn(&AuthState) + Send + Sync>;

pub struct AuthContext<S: SessionStore> {
    store: Arc<S>,
    state: Arc<Mutex<AuthState>>,
    observer: AuthObserver,
    subscription: Mutex<Option<Subscription>>,
}

impl<S: SessionStore> AuthContext<S> {
    pub fn new(store: Arc<S>, observer: impl Fn(&AuthState) + Send + Sync + 'static) -> Self {
        Self {
            store,
            state: Arc::new(Mutex::new(AuthState::default())),
            observer: Arc::new(observer),
            subscription: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        lock(&self.state).clone()
    }

    /// Subscribe to session changes, then resolve the initial session.
    ///
    /// A failed fetch resolves to anonymous and the error is returned for
    /// logging; the app keeps running.
    pub async fn mount(&self) -> Result<(), AuthError> {
        let state = Arc::clone(&self.state);
        let observer = Arc::clone(&self.observer);
        let subscription = self.store.on_session_change(Arc::new(move |_event, session| {
            publish(&state, &observer, AuthState::resolved(session.cloned()));
        }));
        *lock(&self.subscription) = Some(subscription);

        let entered_loading = {
            let mut current = lock(&self.state);
            let fresh = current.phase == AuthPhase::Uninitialized;
            if fresh {
                *current = AuthState::loading();
            }
            fresh.then(|| current.clone())
        };
        if let Some(loading) = entered_loading {
            (self.observer)(&loading);
        }

        let fetched = self.store.current_session().await;
        let (session, result) = match fetched {
            Ok(session) => (session, Ok(())),
            Err(e) => {
                log::warn!("auth: initial session fetch failed: {e}");
                (None, Err(e))
            }
        };
        self.resolve_initial(session);
        result
    }

    /// Start the OAuth hand-off; the sign-in itself arrives as a notification.
    pub async fn sign_in_with_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<(), AuthError> {
        self.store.sign_in_with_oauth(provider, redirect_to).await
    }

    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.store.sign_in_with_password(email, password).await.map(|_| ())
    }

    /// Revoke the session. The state flips to anonymous through the store's
    /// `SignedOut` notification.
    pub async fn log_out(&self) -> Result<(), AuthError> {
        self.store.sign_out().await
    }

    /// Drop the store subscription. Later store events no longer reach the
    /// observer.
    pub fn teardown(&self) {
        lock(&self.subscription).take();
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        lock(&self.subscription).is_some()
    }

    fn resolve_initial(&self, session: Option<Session>) {
        let next = {
            let mut current = lock(&self.state);
            if current.is_resolved() {
                return;
            }
            *current = AuthState::resolved(session);
            current.clone()
        };
        (self.observer)(&next);
    }
}

impl<S: SessionStore> Drop for AuthContext<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn publish(state: &Mutex<AuthState>, observer: &AuthObserver, next: AuthState) {
    *lock(state) = next.clone();
    observer(&next);
}
