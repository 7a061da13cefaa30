//! Process configuration for the web host.
//!
//! `PORT` selects the listen port (default 3000). The endpoint variables are
//! baked into the browser bundle at build time; the host re-reads them only to
//! report missing values at startup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use api::config::Endpoints;

use crate::error::ServerError;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub endpoints: Endpoints,
    pub missing: Vec<api::config::ConfigError>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_port(lookup("PORT").as_deref())?;
        let (endpoints, missing) = Endpoints::from_lookup(&lookup);
        Ok(Self { port, endpoints, missing })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Report every missing endpoint variable once.
    pub fn log_endpoints(&self) {
        for err in &self.missing {
            tracing::error!(error = %err, "configuration incomplete");
        }
        if self.missing.is_empty() {
            tracing::info!(api_url = %self.endpoints.api_url, auth_url = %self.endpoints.auth_url, "endpoints configured");
        }
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ServerError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(DEFAULT_PORT),
        Some(value) => value.parse().map_err(|_| ServerError::InvalidPort(value.to_owned())),
    }
}
