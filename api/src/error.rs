//! Error types shared by the transport, the session store and the API client.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is a value. Pages turn these into fixed inline messages
//! (see `actions`), so nothing here is ever fatal to the UI.

/// Failure to move a request across the wire at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be built or sent (network down, CORS, bad URL).
    #[error("request failed: {0}")]
    Request(String),
    /// The response body could not be read.
    #[error("response read failed: {0}")]
    Body(String),
    /// This transport cannot run in the current environment (e.g. server render).
    #[error("transport not available: {0}")]
    Unavailable(&'static str),
}

/// Failure reported by the session store / remote auth service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Email/password pair was rejected.
    #[error("invalid login credentials")]
    InvalidCredentials,
    /// The auth service answered with a non-success status.
    #[error("auth service rejected request: status {status}: {message}")]
    Rejected { status: u16, message: String },
    /// The auth service could not be reached.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The auth service answered with a body we could not parse.
    #[error("auth response parse failed: {0}")]
    Decode(String),
    /// The OAuth hand-off could not be started.
    #[error("oauth redirect failed: {0}")]
    Redirect(String),
    /// The auth service is not configured.
    #[error("auth service not configured")]
    NotConfigured,
}

/// Failure of a Service Layer call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The API answered with a non-2xx status; `body` is passed through untouched.
    #[error("API response error: status {status}")]
    Status { status: u16, body: String },
    /// The API answered 2xx with a body that does not match the expected shape.
    #[error("API response parse failed: {0}")]
    Decode(String),
    /// The bearer token could not be obtained from the session store.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// HTTP status of the failed response, if the API answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
