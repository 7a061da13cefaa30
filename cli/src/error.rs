//! CLI failure modes. Each one prints to stderr and exits non-zero.

use api::actions::ActionError;
use api::error::{ApiError, AuthError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("not signed in; run `instashare login` first")]
    NotSignedIn,
    #[error("{0}")]
    Action(#[from] ActionError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("unknown role `{0}`; expected admin or user")]
    UnknownRole(String),
    #[error("unknown provider `{0}`; expected google, facebook or linkedin")]
    UnknownProvider(String),
    #[error("{path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("stdin: {0}")]
    Stdin(#[source] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
