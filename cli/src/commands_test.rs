use super::*;

#[test]
fn redirect_fragment_strips_url_prefix() {
    assert_eq!(
        redirect_fragment("http://localhost:3000/dashboard#access_token=abc&expires_in=3600"),
        "access_token=abc&expires_in=3600"
    );
    assert_eq!(redirect_fragment("access_token=abc"), "access_token=abc");
}

#[test]
fn parse_provider_is_case_insensitive() {
    assert_eq!(parse_provider("Google").expect("google"), OAuthProvider::Google);
    assert_eq!(parse_provider(" linkedin ").expect("linkedin"), OAuthProvider::Linkedin);
    assert!(matches!(parse_provider("github"), Err(CliError::UnknownProvider(_))));
}

#[test]
fn content_type_follows_extension() {
    assert_eq!(content_type_for("a.PDF"), "application/pdf");
    assert_eq!(content_type_for("b.zip"), "application/zip");
    assert_eq!(content_type_for("noext"), "application/octet-stream");
}

#[test]
fn read_upload_rejects_disallowed_type_before_reading() {
    let path = std::env::temp_dir().join(format!("instashare-cli-{}-photo.png", std::process::id()));
    fs::write(&path, b"png").expect("write");
    let err = read_upload(&path, "Photo", "png").expect_err("png is not allowed");
    assert_eq!(err.to_string(), "Invalid file type. Allowed types are: pdf, docx, zip.");
    fs::remove_file(&path).expect("cleanup");
}

#[test]
fn read_upload_reads_allowed_file() {
    let path = std::env::temp_dir().join(format!("instashare-cli-{}-report.pdf", std::process::id()));
    fs::write(&path, b"%PDF-1.4").expect("write");
    let file = read_upload(&path, "Report", "pdf").expect("valid upload");
    assert_eq!(file.content_type, "application/pdf");
    assert_eq!(file.bytes, b"%PDF-1.4");
    assert!(file.file_name.ends_with("report.pdf"));
    fs::remove_file(&path).expect("cleanup");
}

#[test]
fn read_upload_reports_missing_file() {
    let err = read_upload(Path::new("/definitely/missing/report.pdf"), "Report", "pdf").expect_err("missing");
    assert!(matches!(err, CliError::File { .. }));
}

#[test]
fn apply_overrides_only_given_values() {
    let mut field = "old".to_owned();
    apply(&mut field, None);
    assert_eq!(field, "old");
    apply(&mut field, Some("new".to_owned()));
    assert_eq!(field, "new");
}
