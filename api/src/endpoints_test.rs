use super::*;

#[test]
fn user_paths_match_api_contract() {
    assert_eq!(user(4), "/users/4");
    assert_eq!(update_user(4), "/updated_user/4");
    assert_eq!(delete_user(4), "/delete_user/4");
    assert_eq!(documents_uploaded_by_user(4), "/documents_upload_by_user/4");
    assert_eq!(assign_role(1, 4), "/add_role/1/user/4");
}

#[test]
fn document_paths_match_api_contract() {
    assert_eq!(document(9), "/documents/9");
    assert_eq!(upload_document_file(4), "/documents/upload_document_file/4");
    assert_eq!(update_document_info(9), "/update_document_info/9");
    assert_eq!(delete_document(9), "/delete_document/9");
    assert_eq!(document_shared_users(9), "/documents/9/shared_by/users");
}

#[test]
fn join_avoids_double_slash() {
    assert_eq!(join("http://api:8000/", USERS), "http://api:8000/users/");
    assert_eq!(join("http://api:8000", DOCUMENTS), "http://api:8000/documents");
    assert_eq!(join("", "/documents"), "/documents");
}
