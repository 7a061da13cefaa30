use super::*;

#[test]
fn extension_is_case_insensitive_and_needs_a_stem() {
    assert_eq!(file_extension("Report.PDF"), Some("pdf".to_owned()));
    assert_eq!(file_extension("archive.tar.zip"), Some("zip".to_owned()));
    assert_eq!(file_extension("README"), None);
    assert_eq!(file_extension(".zip"), None);
    assert_eq!(file_extension("trailing."), None);
}

#[test]
fn only_pdf_docx_zip_are_allowed() {
    assert!(is_allowed_document("plan.docx"));
    assert!(!is_allowed_document("test-document.txt"));
    assert!(!is_allowed_document("slides.doc"));
}

#[test]
fn upload_checks_run_in_order() {
    assert_eq!(check_upload("", "pdf", Some(("a.txt", 1))), Err(ValidationError::MissingUploadFields));
    assert_eq!(check_upload("Doc", "pdf", None), Err(ValidationError::MissingUploadFields));
    assert_eq!(
        check_upload("Doc", "pdf", Some(("a.txt", MAX_UPLOAD_BYTES + 1))),
        Err(ValidationError::DisallowedFileType)
    );
    assert_eq!(check_upload("Doc", "pdf", Some(("a.pdf", MAX_UPLOAD_BYTES + 1))), Err(ValidationError::FileTooLarge));
    assert_eq!(check_upload("Doc", "pdf", Some(("a.pdf", MAX_UPLOAD_BYTES))), Ok(()));
}

#[test]
fn phone_allows_blank_or_7_to_20_digits() {
    assert_eq!(check_phone(""), Ok(()));
    assert_eq!(check_phone("5551234"), Ok(()));
    assert_eq!(check_phone("555123"), Err(ValidationError::InvalidPhone));
    assert_eq!(check_phone("555-1234"), Err(ValidationError::InvalidPhone));
    assert_eq!(check_phone(&"1".repeat(21)), Err(ValidationError::InvalidPhone));
}

#[test]
fn messages_are_the_inline_texts() {
    assert_eq!(ValidationError::PasswordMismatch.to_string(), "Passwords do not match.");
    assert_eq!(
        ValidationError::DisallowedFileType.to_string(),
        "Invalid file type. Allowed types are: pdf, docx, zip."
    );
    assert_eq!(ValidationError::FileTooLarge.to_string(), "File is too large. Maximum size is 500 MB.");
}
