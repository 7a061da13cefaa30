use super::*;
use api::testkit;

#[test]
fn signed_in_visitors_go_to_dashboard() {
    let state = AuthState::resolved(Some(testkit::session("u1", "a@example.com")));
    assert_eq!(signed_in_redirect(&state), Some("/dashboard"));
}

#[test]
fn anonymous_and_loading_visitors_stay() {
    assert_eq!(signed_in_redirect(&AuthState::resolved(None)), None);
    assert_eq!(signed_in_redirect(&AuthState::default()), None);
}

#[test]
fn route_id_parses_integer_params() {
    assert_eq!(route_id(Some("42")), Some(42));
    assert_eq!(route_id(Some(" 7 ")), Some(7));
}

#[test]
fn route_id_rejects_missing_or_non_numeric() {
    assert_eq!(route_id(None), None);
    assert_eq!(route_id(Some("new")), None);
    assert_eq!(route_id(Some("")), None);
}
