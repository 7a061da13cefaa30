//! Client-side form validation. Runs before any network call.
//!
//! Each [`ValidationError`] displays as the exact message the form shows.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

pub const ALLOWED_DOCUMENT_TYPES: [&str; 3] = ["pdf", "docx", "zip"];
pub const MAX_UPLOAD_BYTES: u64 = 500 * 1024 * 1024;
pub const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Please fill in all required fields.")]
    MissingRequiredFields,
    #[error("Please enter only digits for the phone number (7-20 characters).")]
    InvalidPhone,
    #[error("Please fill in all fields and select a file.")]
    MissingUploadFields,
    #[error("Invalid file type. Allowed types are: pdf, docx, zip.")]
    DisallowedFileType,
    #[error("File is too large. Maximum size is 500 MB.")]
    FileTooLarge,
}

/// Lower-cased extension of `file_name`, if it has one.
#[must_use]
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[must_use]
pub fn is_allowed_document(file_name: &str) -> bool {
    file_extension(file_name).is_some_and(|ext| ALLOWED_DOCUMENT_TYPES.contains(&ext.as_str()))
}

/// Blank phones pass; otherwise 7-20 ASCII digits.
pub fn check_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Ok(());
    }
    if PHONE_DIGITS.contains(&phone.len()) && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

/// Upload form checks in display order: completeness, file type, size.
pub fn check_upload(name: &str, file_type: &str, file: Option<(&str, u64)>) -> Result<(), ValidationError> {
    let Some((file_name, size)) = file else {
        return Err(ValidationError::MissingUploadFields);
    };
    if name.trim().is_empty() || file_type.trim().is_empty() {
        return Err(ValidationError::MissingUploadFields);
    }
    if !is_allowed_document(file_name) {
        return Err(ValidationError::DisallowedFileType);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge);
    }
    Ok(())
}

/// True when every value is non-blank.
#[must_use]
pub fn all_filled(values: &[&str]) -> bool {
    values.iter().all(|v| !v.trim().is_empty())
}
