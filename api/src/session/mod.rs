//! Session store contract and change-notification plumbing.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store owns the session. Everything else (the auth context, the
//! API client) reads it through [`SessionStore`] and learns about changes by
//! subscribing. A [`Subscription`] unsubscribes when dropped, so a torn-down
//! observer can never leak a callback.

mod service;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

pub use service::AuthServiceStore;

use crate::error::AuthError;
use crate::types::{OAuthProvider, Session};

/// Why the session changed. Names follow the auth service's event vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// Callback invoked on every session change with the new session (or `None`).
pub type SessionListener = Arc<dyn Fn(SessionEvent, Option<&Session>) + Send + Sync>;

/// Issues, refreshes and revokes sessions; notifies subscribers on change.
#[async_trait::async_trait(?Send)]
pub trait SessionStore {
    /// Current session, refreshed first when it has expired.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Register `listener` for future changes. Dropping the handle unsubscribes.
    fn on_session_change(&self, listener: SessionListener) -> Subscription;

    /// Hand the browser off to `provider`. Resolves once the hand-off started;
    /// the resulting sign-in arrives later as a change notification.
    async fn sign_in_with_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<(), AuthError>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Revoke the session. Local state is cleared even if revocation fails.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[async_trait::async_trait(?Send)]
impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        (**self).current_session().await
    }

    fn on_session_change(&self, listener: SessionListener) -> Subscription {
        (**self).on_session_change(listener)
    }

    async fn sign_in_with_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<(), AuthError> {
        (**self).sign_in_with_oauth(provider, redirect_to).await
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        (**self).sign_in_with_password(email, password).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        (**self).sign_out().await
    }
}

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Where a session survives page reloads (browser storage, a file, memory).
pub trait SessionPersistence: Send + Sync {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

/// Process-local persistence; the default for tests and server render.
#[derive(Default)]
pub struct MemoryPersistence {
    session: Mutex<Option<Session>>,
}

impl MemoryPersistence {
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self { session: Mutex::new(Some(session)) }
    }
}

impl SessionPersistence for MemoryPersistence {
    fn load(&self) -> Option<Session> {
        lock(&self.session).clone()
    }

    fn save(&self, session: &Session) {
        *lock(&self.session) = Some(session.clone());
    }

    fn clear(&self) {
        *lock(&self.session) = None;
    }
}

// =============================================================================
// OBSERVER REGISTRY
// =============================================================================

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, SessionListener)>,
}

/// One-to-many fan-out of session changes.
#[derive(Clone, Default)]
pub struct SessionBroadcast {
    listeners: Arc<Mutex<Listeners>>,
}

impl SessionBroadcast {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: SessionListener) -> Subscription {
        let mut listeners = lock(&self.listeners);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, listener));
        Subscription { id, listeners: Arc::downgrade(&self.listeners) }
    }

    /// Call every live listener. The registry lock is released first so a
    /// listener may subscribe or unsubscribe re-entrantly.
    pub fn notify(&self, event: SessionEvent, session: Option<&Session>) {
        let snapshot: Vec<SessionListener> = lock(&self.listeners)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(event, session);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }
}

/// Live registration in a [`SessionBroadcast`]; unsubscribes on drop.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Subscription {
    /// A handle attached to nothing; for stores that never notify.
    pub fn detached() -> Self {
        Self { id: 0, listeners: Weak::new() }
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).entries.retain(|(id, _)| *id != self.id);
        }
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
