//! Service Layer: one method per remote operation of the document API.
//!
//! DESIGN
//! ======
//! Every call issues exactly one request. The bearer token is read from the
//! session store per call, never cached here, so a refreshed token is picked
//! up on the next request. No retries, no caching; a non-2xx answer comes
//! back as [`ApiError::Status`] with the body untouched.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::endpoints;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::transport::{FormField, HttpRequest, Method, Transport};
use crate::types::{
    CompressionJob, DeleteResponse, Document, DocumentInfoUpdate, DocumentShares, DocumentUpload, NewUser, RoleEvent,
    User, UserDocuments, UserUpdate,
};

pub struct ApiClient<T, S> {
    transport: T,
    sessions: Arc<S>,
    base_url: String,
}

impl<T: Transport, S: SessionStore> ApiClient<T, S> {
    pub fn new(transport: T, sessions: Arc<S>, base_url: impl Into<String>) -> Self {
        Self { transport, sessions, base_url: base_url.into() }
    }

    #[must_use]
    pub fn sessions(&self) -> &Arc<S> {
        &self.sessions
    }

    // =========================================================================
    // USERS
    // =========================================================================

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.call(Method::Get, endpoints::USERS, None).await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        self.call(Method::Get, &endpoints::user(id), None).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.call(Method::Post, endpoints::CREATE_USER, Some(to_json(user)?)).await
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User, ApiError> {
        self.call(Method::Put, &endpoints::update_user(id), Some(to_json(update)?)).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<DeleteResponse, ApiError> {
        self.call(Method::Delete, &endpoints::delete_user(id), None).await
    }

    pub async fn documents_uploaded_by_user(&self, id: i64) -> Result<UserDocuments, ApiError> {
        self.call(Method::Get, &endpoints::documents_uploaded_by_user(id), None).await
    }

    pub async fn assign_role(&self, role_id: i64, user_id: i64) -> Result<serde_json::Value, ApiError> {
        self.call(Method::Post, &endpoints::assign_role(role_id, user_id), None).await
    }

    pub async fn create_role_event(&self, event: &RoleEvent) -> Result<serde_json::Value, ApiError> {
        self.call(Method::Post, endpoints::CREATE_ROLE_EVENT, Some(to_json(event)?)).await
    }

    // =========================================================================
    // DOCUMENTS
    // =========================================================================

    pub async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        self.call(Method::Get, endpoints::DOCUMENTS, None).await
    }

    pub async fn get_document(&self, id: i64) -> Result<Document, ApiError> {
        self.call(Method::Get, &endpoints::document(id), None).await
    }

    pub async fn upload_document_file(&self, user_id: i64, upload: DocumentUpload) -> Result<Document, ApiError> {
        let fields = vec![
            FormField::File {
                name: "file".to_owned(),
                file_name: upload.file.file_name,
                content_type: upload.file.content_type,
                bytes: upload.file.bytes,
            },
            FormField::Text { name: "name".to_owned(), value: upload.name },
            FormField::Text { name: "file_type".to_owned(), value: upload.file_type },
        ];
        let request = self.request(Method::Post, &endpoints::upload_document_file(user_id)).await?.multipart(fields);
        self.execute(request).await
    }

    pub async fn update_document_info(&self, id: i64, update: &DocumentInfoUpdate) -> Result<Document, ApiError> {
        self.call(Method::Put, &endpoints::update_document_info(id), Some(to_json(update)?)).await
    }

    pub async fn delete_document(&self, id: i64) -> Result<DeleteResponse, ApiError> {
        self.call(Method::Delete, &endpoints::delete_document(id), None).await
    }

    pub async fn shared_users(&self, id: i64) -> Result<DocumentShares, ApiError> {
        self.call(Method::Get, &endpoints::document_shared_users(id), None).await
    }

    pub async fn start_compression_job(&self, document_id: i64) -> Result<CompressionJob, ApiError> {
        let body = serde_json::json!({ "document_id": document_id });
        self.call(Method::Post, endpoints::START_COMPRESSION_JOB, Some(body)).await
    }

    // =========================================================================
    // PLUMBING
    // =========================================================================

    async fn request(&self, method: Method, path: &str) -> Result<HttpRequest, ApiError> {
        let session = self.sessions.current_session().await?;
        let token = session.as_ref().map(|s| s.access_token.as_str());
        Ok(HttpRequest::new(method, endpoints::join(&self.base_url, path)).bearer(token))
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<R, ApiError> {
        let mut request = self.request(method, path).await?;
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).await
    }

    async fn execute<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            log::debug!("api: {} {url} -> {}", method.as_str(), response.status);
            return Err(ApiError::Status { status: response.status, body: response.body });
        }
        response.json().map_err(ApiError::Decode)
    }
}

fn to_json<B: serde::Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}
