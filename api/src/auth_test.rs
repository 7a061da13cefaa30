use std::sync::Mutex;

use super::*;
use crate::testkit::{self, MemorySessionStore};

fn recording(store: &Arc<MemorySessionStore>) -> (AuthContext<MemorySessionStore>, Arc<Mutex<Vec<AuthPhase>>>) {
    let phases = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&phases);
    let ctx = AuthContext::new(Arc::clone(store), move |state: &AuthState| {
        sink.lock().expect("phases").push(state.phase);
    });
    (ctx, phases)
}

#[test]
fn default_state_is_loading_and_empty() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(state.user.is_none());
    assert!(!state.is_resolved());
}

#[test]
fn resolved_user_follows_session() {
    let session = testkit::session("u1", "a@example.com");
    let state = AuthState::resolved(Some(session.clone()));
    assert_eq!(state.user, Some(session.user));
    assert!(!state.loading);
    assert_eq!(state.access_token(), Some("token-u1"));

    let anon = AuthState::resolved(None);
    assert_eq!(anon.phase, AuthPhase::Anonymous);
    assert!(anon.user.is_none());
}

#[tokio::test]
async fn mount_resolves_existing_session() {
    let store = Arc::new(MemorySessionStore::new(Some(testkit::session("u1", "a@example.com"))));
    let (ctx, phases) = recording(&store);

    ctx.mount().await.expect("mount");

    assert!(ctx.state().is_authenticated());
    assert_eq!(*phases.lock().expect("phases"), vec![AuthPhase::Loading, AuthPhase::Authenticated]);
    assert_eq!(store.listener_count(), 1);
}

#[tokio::test]
async fn mount_without_session_is_anonymous() {
    let store = Arc::new(MemorySessionStore::new(None));
    let (ctx, _) = recording(&store);
    ctx.mount().await.expect("mount");
    assert_eq!(ctx.state().phase, AuthPhase::Anonymous);
    assert!(!ctx.state().loading);
}

#[tokio::test]
async fn failed_fetch_resolves_anonymous_and_reports() {
    let store = Arc::new(MemorySessionStore::new(Some(testkit::session("u1", "a@example.com"))));
    store.fail_next_fetch(AuthError::Decode("garbled".to_owned()));
    let (ctx, _) = recording(&store);

    let err = ctx.mount().await.expect_err("fetch failed");
    assert_eq!(err, AuthError::Decode("garbled".to_owned()));
    assert_eq!(ctx.state().phase, AuthPhase::Anonymous);
}

#[tokio::test]
async fn notifications_update_state_after_mount() {
    let store = Arc::new(MemorySessionStore::new(None));
    let (ctx, phases) = recording(&store);
    ctx.mount().await.expect("mount");

    store.set_session(Some(testkit::session("u2", "b@example.com")));
    let state = ctx.state();
    assert!(state.is_authenticated());
    assert_eq!(state.user.map(|u| u.id), Some("u2".to_owned()));

    store.set_session(None);
    assert_eq!(ctx.state().phase, AuthPhase::Anonymous);
    assert_eq!(
        *phases.lock().expect("phases"),
        vec![AuthPhase::Loading, AuthPhase::Anonymous, AuthPhase::Authenticated, AuthPhase::Anonymous]
    );
}

#[tokio::test]
async fn loading_ends_at_first_resolution_for_every_sequence() {
    // Every sign-in/sign-out sequence up to length 5, from both starting states.
    for initial_signed_in in [false, true] {
        for len in 0..=5u32 {
            for bits in 0..(1u32 << len) {
                let initial = initial_signed_in.then(|| testkit::session("u0", "a@example.com"));
                let store = Arc::new(MemorySessionStore::new(initial));
                let states = Arc::new(Mutex::new(Vec::<AuthState>::new()));
                let sink = Arc::clone(&states);
                let ctx = AuthContext::new(Arc::clone(&store), move |state: &AuthState| {
                    sink.lock().expect("states").push(state.clone());
                });
                ctx.mount().await.expect("mount");

                for step in 0..len {
                    let signed_in = bits & (1 << step) != 0;
                    let session = signed_in.then(|| testkit::session(&format!("u{step}"), "a@example.com"));
                    store.set_session(session);
                }

                let states = states.lock().expect("states");
                let case = format!("initial={initial_signed_in} len={len} bits={bits:b}");
                assert_eq!(states.len(), len as usize + 2, "{case}");
                assert!(states[0].loading, "{case}");
                assert_eq!(states[0].phase, AuthPhase::Loading, "{case}");
                for state in &states[1..] {
                    assert!(!state.loading, "{case}");
                    assert!(state.is_resolved(), "{case}");
                    assert_eq!(state.is_authenticated(), state.user.is_some(), "{case}");
                }
            }
        }
    }
}

/// Store whose initial fetch races a sign-in notification.
struct RacingStore {
    inner: MemorySessionStore,
}

#[async_trait::async_trait(?Send)]
impl SessionStore for RacingStore {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        // Sign-in lands while the fetch is in flight; the fetch still answers "none".
        self.inner.set_session(Some(testkit::session("u3", "c@example.com")));
        Ok(None)
    }

    fn on_session_change(&self, listener: crate::session::SessionListener) -> Subscription {
        self.inner.on_session_change(listener)
    }

    async fn sign_in_with_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<(), AuthError> {
        self.inner.sign_in_with_oauth(provider, redirect_to).await
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.inner.sign_in_with_password(email, password).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.inner.sign_out().await
    }
}

#[tokio::test]
async fn notification_beats_stale_initial_fetch() {
    let store = Arc::new(RacingStore { inner: MemorySessionStore::new(None) });
    let ctx = AuthContext::new(store, |_: &AuthState| {});

    ctx.mount().await.expect("mount");

    let state = ctx.state();
    assert!(state.is_authenticated());
    assert_eq!(state.user.map(|u| u.id), Some("u3".to_owned()));
}

#[tokio::test]
async fn oauth_sign_in_leaves_state_untouched() {
    let store = Arc::new(MemorySessionStore::new(None));
    let (ctx, _) = recording(&store);
    ctx.mount().await.expect("mount");

    ctx.sign_in_with_oauth(OAuthProvider::Google, "http://localhost/dashboard").await.expect("hand-off");

    assert_eq!(store.oauth_requests(), vec![(OAuthProvider::Google, "http://localhost/dashboard".to_owned())]);
    assert_eq!(ctx.state().phase, AuthPhase::Anonymous);
}

#[tokio::test]
async fn password_sign_in_and_log_out_flow_through_notifications() {
    let store = Arc::new(MemorySessionStore::new(None));
    store.accept_password("a@example.com", "pw");
    let (ctx, _) = recording(&store);
    ctx.mount().await.expect("mount");

    assert_eq!(ctx.sign_in_with_password("a@example.com", "bad").await, Err(AuthError::InvalidCredentials));
    ctx.sign_in_with_password("a@example.com", "pw").await.expect("sign in");
    assert!(ctx.state().is_authenticated());

    ctx.log_out().await.expect("log out");
    assert_eq!(ctx.state().phase, AuthPhase::Anonymous);
    assert_eq!(store.sign_out_calls(), 1);
}

#[tokio::test]
async fn teardown_stops_updates() {
    let store = Arc::new(MemorySessionStore::new(None));
    let (ctx, _) = recording(&store);
    ctx.mount().await.expect("mount");

    ctx.teardown();
    assert!(!ctx.is_subscribed());
    assert_eq!(store.listener_count(), 0);

    store.set_session(Some(testkit::session("u1", "a@example.com")));
    assert_eq!(ctx.state().phase, AuthPhase::Anonymous);
}

#[tokio::test]
async fn dropping_context_unsubscribes() {
    let store = Arc::new(MemorySessionStore::new(None));
    {
        let (ctx, _) = recording(&store);
        ctx.mount().await.expect("mount");
        assert_eq!(store.listener_count(), 1);
    }
    assert_eq!(store.listener_count(), 0);
}
