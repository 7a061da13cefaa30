//! Upload, my-documents and document detail actions.

#[cfg(test)]
#[path = "documents_test.rs"]
mod documents_test;

use super::{fail, resolve_api_user, ActionError, Confirmation, Notice, Outcome, MY_DOCUMENTS_PATH};
use crate::client::ApiClient;
use crate::session::SessionStore;
use crate::transport::Transport;
use crate::types::{Document, DocumentInfoUpdate, DocumentUpload, FilePayload, SharedWithUser, User};
use crate::validation::{self, ValidationError};

pub const UPLOAD_FAILED: &str = "Failed to upload document.";
pub const LOAD_MINE_FAILED: &str = "Failed to load your documents.";
pub const LOGIN_REQUIRED: &str = "Please log in to view your documents.";
pub const NO_DOCUMENTS: &str = "You haven't uploaded any documents yet.";
pub const LOAD_DETAIL_FAILED: &str = "Failed to load document details.";
pub const NOT_FOUND: &str = "Document not found.";
pub const UPDATED: &str = "Document updated successfully!";
pub const UPDATE_FAILED: &str = "Failed to update document.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this document?";
pub const DELETED: &str = "Document deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete document.";
pub const COMPRESSION_PROMPT: &str = "Are you sure you want to start a compression job for this document?";
pub const COMPRESSION_FAILED: &str = "Failed to start compression job.";
pub const NOT_SHARED: &str = "Not shared with anyone yet.";
pub const SHARE_UNSUPPORTED: &str = "Sharing documents is not supported by the API yet.";
pub const SELECT_USER: &str = "Please select a user to share with.";
/// Upload needs an API user; shown when the session email has no match.
pub const NO_API_USER: &str = "Your account is not registered with the document service.";

#[must_use]
pub fn uploaded_message(file_name: &str) -> String {
    format!("Document '{file_name}' uploaded successfully!")
}

#[must_use]
pub fn compression_started_message(idjob: i64) -> String {
    format!("Compression job started successfully for document. Job ID: {idjob}")
}

/// One row of the my-documents list.
#[must_use]
pub fn document_row(document: &Document) -> String {
    format!("{} ({}) - {}", document.name, document.doc_type, document.size.as_deref().unwrap_or("-"))
}

/// One row of the shared-with list.
#[must_use]
pub fn shared_row(user: &SharedWithUser) -> String {
    format!("{} ({}) - Shared on: {}", user.name, user.email, user.shared_date)
}

// =============================================================================
// UPLOAD
// =============================================================================

/// Upload form state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadDraft {
    pub name: String,
    pub file_type: String,
    pub file: Option<FilePayload>,
}

impl UploadDraft {
    pub fn validate(&self) -> Result<DocumentUpload, ValidationError> {
        let file = self.file.as_ref().map(|f| (f.file_name.as_str(), f.bytes.len() as u64));
        validation::check_upload(&self.name, &self.file_type, file)?;
        let file = self.file.clone().ok_or(ValidationError::MissingUploadFields)?;
        Ok(DocumentUpload { name: self.name.trim().to_owned(), file_type: self.file_type.trim().to_owned(), file })
    }
}

/// Validate, resolve the uploader's API id, then upload. Validation failures
/// issue no request.
pub async fn upload_document<T: Transport, S: SessionStore>(
    api: &ApiClient<T, S>,
    draft: &UploadDraft,
) -> Result<Notice, ActionError> {
    let upload = draft.validate()?;
    let user = resolve_api_user(api)
        .await
        .map_err(fail("documents: resolve uploader", UPLOAD_FAILED))?
        .ok_or_else(|| ActionError::new(NO_API_USER))?;
    let file_name = upload.file.file_name.clone();
    api.upload_document_file(user.id, upload).await.map_err(fail("documents: upload", UPLOAD_FAILED))?;
    Ok(Notice::then_go(uploaded_message(&file_name), MY_DOCUMENTS_PATH))
}

// =============================================================================
// MY DOCUMENTS
// =============================================================================

pub async fn load_my_documents<T: Transport, S: SessionStore>(
    api: &ApiClient<T, S>,
) -> Result<Vec<Document>, ActionError> {
    let signed_in = api
        .sessions()
        .current_session()
        .await
        .map_err(fail("documents: session", LOAD_MINE_FAILED))?
        .is_some();
    if !signed_in {
        return Err(ActionError::new(LOGIN_REQUIRED));
    }
    let Some(user) = resolve_api_user(api).await.map_err(fail("documents: resolve owner", LOAD_MINE_FAILED))? else {
        return Ok(Vec::new());
    };
    let mine = api
        .documents_uploaded_by_user(user.id)
        .await
        .map_err(fail("documents: list mine", LOAD_MINE_FAILED))?;
    Ok(mine.upload_documents)
}

// =============================================================================
// DETAIL
// =============================================================================

/// Everything the detail page shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentDetail {
    pub document: Document,
    pub shared_with: Vec<SharedWithUser>,
    /// Users the document is not shared with yet (share picker options).
    pub available_users: Vec<User>,
}

/// Fetch the document, its share list, and the share picker options.
pub async fn load_document_detail<T: Transport, S: SessionStore>(
    api: &ApiClient<T, S>,
    id: i64,
) -> Result<DocumentDetail, ActionError> {
    let document = match api.get_document(id).await {
        Ok(document) => document,
        Err(e) if e.status() == Some(404) => return Err(ActionError::new(NOT_FOUND)),
        Err(e) => return Err(fail("documents: get", LOAD_DETAIL_FAILED)(e)),
    };
    let shares = api.shared_users(id).await.map_err(fail("documents: shares", LOAD_DETAIL_FAILED))?;
    let users = api.list_users().await.map_err(fail("documents: users", LOAD_DETAIL_FAILED))?;
    let available_users = unshared_users(users, &shares.shared_with);
    Ok(DocumentDetail { document, shared_with: shares.shared_with, available_users })
}

#[must_use]
pub fn unshared_users(users: Vec<User>, shared_with: &[SharedWithUser]) -> Vec<User> {
    users.into_iter().filter(|u| !shared_with.iter().any(|s| s.id == u.id)).collect()
}

/// Save the draft; on success returns the last-fetched copy with the draft applied.
pub async fn update_document<T: Transport, S: SessionStore>(
    api: &ApiClient<T, S>,
    current: &Document,
    draft: &DocumentInfoUpdate,
) -> Result<(Document, Notice), ActionError> {
    let name = draft.name.as_deref().unwrap_or_default();
    let doc_type = draft.doc_type.as_deref().unwrap_or_default();
    if !validation::all_filled(&[name, doc_type]) {
        return Err(ValidationError::MissingRequiredFields.into());
    }
    api.update_document_info(current.id, draft).await.map_err(fail("documents: update", UPDATE_FAILED))?;
    Ok((draft.apply_to(current), Notice::stay(UPDATED)))
}

pub async fn delete_document<T: Transport, S: SessionStore>(
    api: &ApiClient<T, S>,
    id: i64,
    confirmation: Confirmation,
) -> Result<Outcome<Notice>, ActionError> {
    if confirmation == Confirmation::Declined {
        return Ok(Outcome::Cancelled);
    }
    api.delete_document(id).await.map_err(fail("documents: delete", DELETE_FAILED))?;
    Ok(Outcome::Done(Notice::then_go(DELETED, MY_DOCUMENTS_PATH)))
}

pub async fn start_compression<T: Transport, S: SessionStore>(
    api: &ApiClient<T, S>,
    id: i64,
    confirmation: Confirmation,
) -> Result<Outcome<Notice>, ActionError> {
    if confirmation == Confirmation::Declined {
        return Ok(Outcome::Cancelled);
    }
    let job = api.start_compression_job(id).await.map_err(fail("documents: compression", COMPRESSION_FAILED))?;
    Ok(Outcome::Done(Notice::stay(compression_started_message(job.idjob))))
}

/// The API has no share endpoint; the action reports that instead of
/// pretending to succeed.
pub fn share_document(document_id: i64, user_id: Option<i64>) -> Result<Notice, ActionError> {
    let Some(user_id) = user_id else {
        return Err(ActionError::new(SELECT_USER));
    };
    log::warn!("documents: share requested for document={document_id} user={user_id}; no share endpoint");
    Err(ActionError::new(SHARE_UNSUPPORTED))
}
