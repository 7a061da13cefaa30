use super::*;

#[test]
fn is_auth_fragment_detects_tokens() {
    assert!(is_auth_fragment("#access_token=abc&token_type=bearer&expires_in=3600"));
    assert!(is_auth_fragment("token_type=bearer&access_token=abc"));
}

#[test]
fn is_auth_fragment_detects_provider_errors() {
    assert!(is_auth_fragment("#error=access_denied&error_description=User+cancelled"));
}

#[test]
fn is_auth_fragment_ignores_plain_anchors() {
    assert!(!is_auth_fragment(""));
    assert!(!is_auth_fragment("#"));
    assert!(!is_auth_fragment("#section-2"));
    assert!(!is_auth_fragment("#not_access_token=1"));
}

#[test]
fn strip_fragment_keeps_path_and_query() {
    assert_eq!(strip_fragment("/dashboard", ""), "/dashboard");
    assert_eq!(strip_fragment("/dashboard", "?tab=2"), "/dashboard?tab=2");
    assert_eq!(strip_fragment("", ""), "/");
}

#[test]
fn build_services_shares_one_session_store() {
    let endpoints = Endpoints {
        api_url: "http://api.test".to_owned(),
        auth_url: "http://auth.test".to_owned(),
        auth_key: "anon".to_owned(),
    };
    let (store, api) = build_services(&endpoints);
    assert!(Arc::ptr_eq(&store, api.sessions()));
}

#[test]
fn server_render_cannot_redirect() {
    assert!(matches!(assign_location("http://auth.test"), Err(AuthError::Redirect(_))));
}
