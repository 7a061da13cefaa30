//! The single I/O seam of the client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both the document API client and the auth-service session store describe
//! requests as plain [`HttpRequest`] values and hand them to a [`Transport`].
//! The browser plugs in `gloo-net`, the CLI plugs in `reqwest`, tests plug in
//! [`crate::testkit::MemoryTransport`].

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::TransportError;

/// HTTP verbs used by the document API and the auth service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// One multipart form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Text { name: String, value: String },
    File { name: String, file_name: String, content_type: String, bytes: Vec<u8> },
}

/// Request payload.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormField>),
}

/// A fully-resolved request: absolute URL, headers, body.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: RequestBody::Empty }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn bearer(self, token: Option<&str>) -> Self {
        match token {
            Some(token) => self.header("Authorization", format!("Bearer {token}")),
            None => self,
        }
    }

    /// Attach a JSON body and the matching content type.
    #[must_use]
    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::Json(value);
        self.header("Content-Type", "application/json")
    }

    /// Attach a multipart body. The transport sets the boundary header.
    #[must_use]
    pub fn multipart(mut self, fields: Vec<FormField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    /// Value of the first header named `name` (case-insensitive).
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body of a response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON. An empty body parses as `null`.
    ///
    /// # Errors
    ///
    /// Returns the serde error message when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, String> {
        let body = if self.body.trim().is_empty() { "null" } else { self.body.as_str() };
        serde_json::from_str(body).map_err(|e| e.to_string())
    }
}

/// Sends one request and returns whatever the peer answered.
///
/// Implementations never retry and never interpret the status code; that is
/// left to the caller.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait::async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
