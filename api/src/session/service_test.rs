use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;

use super::*;
use crate::error::TransportError;
use crate::session::MemoryPersistence;
use crate::testkit::{self, MemoryTransport};
use crate::transport::RequestBody;

const NOW: i64 = 1_700_000_000;

fn fixed_clock() -> i64 {
    NOW
}

fn endpoints() -> Endpoints {
    Endpoints {
        api_url: "http://api.test".to_owned(),
        auth_url: "http://auth.test".to_owned(),
        auth_key: "anon-key".to_owned(),
    }
}

fn token_body(access: &str) -> serde_json::Value {
    json!({
        "access_token": access,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "r-2",
        "user": { "id": "u1", "email": "a@example.com", "user_metadata": { "full_name": "Ann" } }
    })
}

fn store(transport: &MemoryTransport, persistence: MemoryPersistence) -> AuthServiceStore<MemoryTransport, MemoryPersistence> {
    AuthServiceStore::new(transport.clone(), persistence, &endpoints()).with_clock(fixed_clock)
}

fn record_events(store: &AuthServiceStore<MemoryTransport, MemoryPersistence>) -> (Arc<Mutex<Vec<SessionEvent>>>, Subscription) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let sub = store.on_session_change(Arc::new(move |event, _| sink.lock().expect("events").push(event)));
    (events, sub)
}

#[tokio::test]
async fn password_grant_persists_and_notifies() {
    let transport = MemoryTransport::new();
    transport.respond(Method::Post, auth::PASSWORD_GRANT, 200, token_body("a-1"));
    let store = store(&transport, MemoryPersistence::default());
    let (events, _sub) = record_events(&store);

    let session = store.sign_in_with_password("a@example.com", "pw").await.expect("sign in");

    assert_eq!(session.access_token, "a-1");
    assert_eq!(session.expires_at, Some(NOW + 3600));
    assert_eq!(store.current_session().await.expect("current"), Some(session));
    assert_eq!(*events.lock().expect("events"), vec![SessionEvent::SignedIn]);

    let request = transport.last_request().expect("request");
    assert_eq!(request.header_value("apikey"), Some("anon-key"));
    assert_eq!(request.body, RequestBody::Json(json!({ "email": "a@example.com", "password": "pw" })));
}

#[tokio::test]
async fn bad_password_maps_to_invalid_credentials() {
    let transport = MemoryTransport::new();
    transport.respond(
        Method::Post,
        auth::PASSWORD_GRANT,
        400,
        json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" }),
    );
    let store = store(&transport, MemoryPersistence::default());

    let err = store.sign_in_with_password("a@example.com", "nope").await.expect_err("rejected");
    assert_eq!(err, AuthError::InvalidCredentials);
    assert_eq!(store.current_session().await.expect("current"), None);
}

#[tokio::test]
async fn expired_session_is_refreshed_once() {
    let transport = MemoryTransport::new();
    transport.respond(Method::Post, auth::REFRESH_GRANT, 200, token_body("a-2"));
    let mut stale = testkit::session("u1", "a@example.com");
    stale.expires_at = Some(NOW - 1);
    let store = store(&transport, MemoryPersistence::with_session(stale));
    let (events, _sub) = record_events(&store);

    let fresh = store.current_session().await.expect("current").expect("session");
    assert_eq!(fresh.access_token, "a-2");
    assert_eq!(*events.lock().expect("events"), vec![SessionEvent::TokenRefreshed]);

    // Refreshed session is persisted; no second refresh.
    store.current_session().await.expect("current");
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn rejected_refresh_signs_out() {
    let transport = MemoryTransport::new();
    transport.respond(Method::Post, auth::REFRESH_GRANT, 401, json!({ "msg": "refresh token revoked" }));
    let mut stale = testkit::session("u1", "a@example.com");
    stale.expires_at = Some(NOW);
    let store = store(&transport, MemoryPersistence::with_session(stale));
    let (events, _sub) = record_events(&store);

    assert_eq!(store.current_session().await.expect("current"), None);
    assert_eq!(*events.lock().expect("events"), vec![SessionEvent::SignedOut]);
}

#[tokio::test]
async fn unreachable_refresh_keeps_session() {
    let transport = MemoryTransport::new();
    transport.fail_with(TransportError::Request("offline".to_owned()));
    let mut stale = testkit::session("u1", "a@example.com");
    stale.expires_at = Some(NOW);
    let store = store(&transport, MemoryPersistence::with_session(stale.clone()));

    let err = store.current_session().await.expect_err("offline");
    assert!(matches!(err, AuthError::Transport(_)));
    assert_eq!(store.persistence.load(), Some(stale));
}

#[tokio::test]
async fn refresh_server_error_keeps_session() {
    let transport = MemoryTransport::new();
    transport.respond(Method::Post, auth::REFRESH_GRANT, 503, json!({ "msg": "service unavailable" }));
    let mut stale = testkit::session("u1", "a@example.com");
    stale.expires_at = Some(NOW);
    let store = store(&transport, MemoryPersistence::with_session(stale.clone()));
    let (events, _sub) = record_events(&store);

    let err = store.current_session().await.expect_err("outage");
    assert!(matches!(err, AuthError::Rejected { status: 503, .. }));
    assert_eq!(store.persistence.load(), Some(stale));
    assert!(events.lock().expect("events").is_empty());
}

#[tokio::test]
async fn oauth_hands_off_authorize_url() {
    let transport = MemoryTransport::new();
    let visited = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&visited);
    let store = store(&transport, MemoryPersistence::default()).with_redirect(move |url| {
        sink.lock().expect("visited").push(url.to_owned());
        Ok(())
    });

    store
        .sign_in_with_oauth(OAuthProvider::Linkedin, "http://localhost:3000/dashboard")
        .await
        .expect("hand-off");

    let visited = visited.lock().expect("visited");
    assert_eq!(
        visited.as_slice(),
        ["http://auth.test/auth/v1/authorize?provider=linkedin&redirect_to=http%3A%2F%2Flocalhost%3A3000%2Fdashboard"]
    );
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn oauth_without_configuration_fails() {
    let store = AuthServiceStore::new(MemoryTransport::new(), MemoryPersistence::default(), &Endpoints::default());
    let err = store.sign_in_with_oauth(OAuthProvider::Google, "/dashboard").await.expect_err("unconfigured");
    assert_eq!(err, AuthError::NotConfigured);
}

#[tokio::test]
async fn redirect_fragment_completes_sign_in() {
    let transport = MemoryTransport::new();
    transport.respond(Method::Get, auth::USER, 200, json!({ "id": "u9", "email": "g@example.com" }));
    let store = store(&transport, MemoryPersistence::default());
    let (events, _sub) = record_events(&store);

    let session = store
        .complete_redirect("#access_token=tok&expires_in=60&refresh_token=r&token_type=bearer")
        .await
        .expect("complete")
        .expect("session");

    assert_eq!(session.user.id, "u9");
    assert_eq!(session.expires_at, Some(NOW + 60));
    assert_eq!(transport.last_request().expect("request").header_value("authorization"), Some("Bearer tok"));
    assert_eq!(*events.lock().expect("events"), vec![SessionEvent::SignedIn]);
}

#[tokio::test]
async fn redirect_without_tokens_is_a_no_op() {
    let transport = MemoryTransport::new();
    let store = store(&transport, MemoryPersistence::default());
    assert_eq!(store.complete_redirect("").await.expect("complete"), None);
    assert_eq!(transport.request_count(), 0);

    let err = store.complete_redirect("#error=access_denied&error_description=User+cancelled").await;
    assert_eq!(err, Err(AuthError::Rejected { status: 400, message: "User cancelled".to_owned() }));
}

#[tokio::test]
async fn sign_out_clears_even_when_revocation_fails() {
    let transport = MemoryTransport::new();
    transport.respond(Method::Post, auth::LOGOUT, 500, json!({ "msg": "boom" }));
    let store = store(&transport, MemoryPersistence::with_session(testkit::session("u1", "a@example.com")));
    let signed_out = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&signed_out);
    let _sub = store.on_session_change(Arc::new(move |event, session| {
        assert_eq!(event, SessionEvent::SignedOut);
        assert!(session.is_none());
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let err = store.sign_out().await.expect_err("revocation failed");
    assert_eq!(err, AuthError::Rejected { status: 500, message: "boom".to_owned() });
    assert_eq!(store.current_session().await.expect("current"), None);
    assert_eq!(signed_out.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn sign_out_treats_stale_token_as_revoked() {
    let transport = MemoryTransport::new();
    transport.respond(Method::Post, auth::LOGOUT, 401, json!({}));
    let store = store(&transport, MemoryPersistence::with_session(testkit::session("u1", "a@example.com")));

    store.sign_out().await.expect("sign out");
    assert_eq!(store.current_session().await.expect("current"), None);
}
