use super::*;
use api::testkit;

#[test]
fn redirects_when_resolved_anonymous() {
    assert_eq!(redirect_target(&AuthState::resolved(None)), Some("/login"));
}

#[test]
fn does_not_redirect_while_loading() {
    assert_eq!(redirect_target(&AuthState::default()), None);
    assert_eq!(redirect_target(&AuthState::loading()), None);
}

#[test]
fn does_not_redirect_when_signed_in() {
    let state = AuthState::resolved(Some(testkit::session("u1", "a@example.com")));
    assert_eq!(redirect_target(&state), None);
}

#[test]
fn placeholder_shows_loading_text_only() {
    assert_eq!(fallback_text(GuardDecision::Placeholder), "Loading authentication...");
    assert_eq!(fallback_text(GuardDecision::Redirect("/login")), "");
}
