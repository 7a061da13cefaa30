use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn complete_config_has_no_errors_and_trims_slashes() {
    let (endpoints, errors) = Endpoints::from_lookup(lookup(&[
        (API_URL_VAR, "http://localhost:8000/"),
        (AUTH_URL_VAR, " https://auth.example.co// "),
        (AUTH_KEY_VAR, "anon"),
    ]));
    assert!(errors.is_empty());
    assert_eq!(endpoints.api_url, "http://localhost:8000");
    assert_eq!(endpoints.auth_url, "https://auth.example.co");
    assert_eq!(endpoints.auth_key, "anon");
    assert!(endpoints.auth_configured());
}

#[test]
fn missing_values_are_reported_not_fatal() {
    let (endpoints, errors) = Endpoints::from_lookup(lookup(&[(AUTH_KEY_VAR, "anon")]));
    assert_eq!(
        errors,
        vec![ConfigError::Missing { var: API_URL_VAR }, ConfigError::Missing { var: AUTH_URL_VAR }]
    );
    assert_eq!(endpoints.api_url, "");
    assert!(!endpoints.auth_configured());
}

#[test]
fn blank_value_counts_as_missing() {
    let (_, errors) = Endpoints::from_lookup(lookup(&[
        (API_URL_VAR, "   "),
        (AUTH_URL_VAR, "https://auth"),
        (AUTH_KEY_VAR, "k"),
    ]));
    assert_eq!(errors, vec![ConfigError::Missing { var: API_URL_VAR }]);
}

#[test]
fn missing_error_names_the_variable() {
    let err = ConfigError::Missing { var: API_URL_VAR };
    assert!(err.to_string().starts_with("INSTASHARE_API_URL is not defined"));
}
