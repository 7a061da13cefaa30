use super::*;

#[test]
fn bearer_adds_authorization_header_only_with_token() {
    let with = HttpRequest::new(Method::Get, "http://api/users/").bearer(Some("tok"));
    assert_eq!(with.header_value("authorization"), Some("Bearer tok"));

    let without = HttpRequest::new(Method::Get, "http://api/users/").bearer(None);
    assert_eq!(without.header_value("Authorization"), None);
}

#[test]
fn json_sets_body_and_content_type() {
    let req = HttpRequest::new(Method::Post, "http://api/create_user/").json(serde_json::json!({ "a": 1 }));
    assert_eq!(req.body, RequestBody::Json(serde_json::json!({ "a": 1 })));
    assert_eq!(req.header_value("Content-Type"), Some("application/json"));
}

#[test]
fn response_success_range() {
    assert!(HttpResponse::new(200, "").is_success());
    assert!(HttpResponse::new(204, "").is_success());
    assert!(!HttpResponse::new(301, "").is_success());
    assert!(!HttpResponse::new(404, "").is_success());
}

#[test]
fn empty_body_parses_as_null() {
    let value: serde_json::Value = HttpResponse::new(200, "  ").json().expect("json");
    assert_eq!(value, serde_json::Value::Null);
}

#[test]
fn malformed_body_reports_parse_error() {
    let parsed: Result<Vec<i64>, String> = HttpResponse::new(200, "{").json();
    assert!(parsed.is_err());
}
