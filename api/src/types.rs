//! Wire DTOs for the document API and the auth service.
//!
//! DESIGN
//! ======
//! Field names follow the remote API verbatim (including `responsability`
//! and the `type` key on documents) so serde round-trips stay lossless.
//! Optional audit fields default to `None` because list endpoints omit them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// SESSION
// =============================================================================

/// Profile data the auth service keeps next to the identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
}

/// The identity that owns a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Auth-service user id (UUID string, unrelated to API user ids).
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl SessionUser {
    /// Full name when the provider supplied one, else the email, else the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user_metadata
            .full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

/// Server-issued proof of authentication.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Expiry as unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: SessionUser,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

impl Session {
    /// Whether the access token is past its expiry at `now` (unix seconds).
    ///
    /// Sessions without an expiry never expire client-side.
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Supported OAuth providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Facebook,
    Linkedin,
}

impl OAuthProvider {
    pub const ALL: [Self; 3] = [Self::Google, Self::Facebook, Self::Linkedin];

    /// Provider key as the auth service expects it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
            Self::Linkedin => "linkedin",
        }
    }

    /// Human label for buttons.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Facebook => "Facebook",
            Self::Linkedin => "LinkedIn",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// USERS
// =============================================================================

/// A user record as returned by `/users/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub responsability: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

/// Body of `POST /create_user/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub responsability: String,
    pub password: String,
}

/// Body of `PUT /updated_user/{id}`; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// `GET /documents_upload_by_user/{id}`: the user plus their uploads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDocuments {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub upload_documents: Vec<Document>,
}

/// Roles seeded by the backend. Ids match the seed order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const ALL: [Self; 2] = [Self::User, Self::Admin];

    #[must_use]
    pub fn id(self) -> i64 {
        match self {
            Self::Admin => 1,
            Self::User => 2,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::User => "User",
        }
    }

    /// Parse a role name case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /create_role_evet/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEvent {
    pub event: String,
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_description: Option<String>,
}

// =============================================================================
// DOCUMENTS
// =============================================================================

/// Processing state of an uploaded document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Uploaded,
    Process,
    Downloaded,
}

impl DocumentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Process => "process",
            Self::Downloaded => "downloaded",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

/// Body of `PUT /update_document_info/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DocumentStatus>,
}

impl DocumentInfoUpdate {
    /// Draft seeded from the last-fetched document.
    #[must_use]
    pub fn from_document(document: &Document) -> Self {
        Self { name: Some(document.name.clone()), doc_type: Some(document.doc_type.clone()), status: document.status }
    }

    /// Copy of `document` with this draft applied.
    #[must_use]
    pub fn apply_to(&self, document: &Document) -> Document {
        let mut next = document.clone();
        if let Some(name) = &self.name {
            next.name.clone_from(name);
        }
        if let Some(doc_type) = &self.doc_type {
            next.doc_type.clone_from(doc_type);
        }
        if self.status.is_some() {
            next.status = self.status;
        }
        next
    }
}

/// A file selected for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePayload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Multipart body of `POST /documents/upload_document_file/{id}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentUpload {
    pub name: String,
    pub file_type: String,
    pub file: FilePayload,
}

/// A user a document has been shared with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedWithUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub shared_date: String,
}

/// `GET /documents/{id}/shared_by/users`: the document plus its share list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentShares {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub shared_with: Vec<SharedWithUser>,
}

/// Answer of the delete endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub message: String,
}

/// Answer of `POST /inicialize_document_compresion_job/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionJob {
    pub idjob: i64,
    #[serde(default)]
    pub document_size: Option<i64>,
    #[serde(default)]
    pub started_timed_at: Option<String>,
}
