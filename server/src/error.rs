//! Startup and serve failures. Each one ends the process with a non-zero exit.

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid PORT {0:?}: expected an integer between 0 and 65535")]
    InvalidPort(String),
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}
