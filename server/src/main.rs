//! InstaShare web host: server-renders the Leptos app and serves its assets.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser talks to the document API and the auth service directly; this
//! process only renders pages, serves `/pkg` and answers health checks.

#![recursion_limit = "256"]

mod config;
mod error;
mod routes;

use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "instashare-web failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), ServerError> {
    let config = config::ServerConfig::from_env()?;
    config.log_endpoints();

    let app = routes::app()?;
    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .map_err(ServerError::Bind)?;

    tracing::info!(port = config.port, "instashare-web listening");
    axum::serve(listener, app).await.map_err(ServerError::Serve)
}
