use super::*;

#[test]
fn provider_buttons_use_human_labels() {
    let labels: Vec<String> = OAuthProvider::ALL.into_iter().map(provider_button_label).collect();
    assert_eq!(labels, ["Sign in with Google", "Sign in with Facebook", "Sign in with LinkedIn"]);
}

#[test]
fn provider_button_class_carries_provider_key() {
    assert_eq!(provider_button_class(OAuthProvider::Linkedin), "login-button login-button--linkedin");
}
