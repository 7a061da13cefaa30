//! Endpoint configuration: API base URL plus auth service URL and key.
//!
//! Missing values are not fatal. They come back as [`ConfigError`]s that the
//! caller logs once at startup; the affected calls then fail at request time.

pub const API_URL_VAR: &str = "INSTASHARE_API_URL";
pub const AUTH_URL_VAR: &str = "INSTASHARE_AUTH_URL";
pub const AUTH_KEY_VAR: &str = "INSTASHARE_AUTH_KEY";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not defined; set it in the environment or a .env file")]
    Missing { var: &'static str },
}

/// Remote service locations, trailing slashes trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub api_url: String,
    pub auth_url: String,
    pub auth_key: String,
}

impl Endpoints {
    /// Build endpoints from any key/value source (process env, `option_env!`, CLI flags).
    ///
    /// Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();
        let mut read = |var: &'static str| {
            let value = lookup(var).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
            if value.is_none() {
                errors.push(ConfigError::Missing { var });
            }
            value.unwrap_or_default()
        };

        let api_url = read(API_URL_VAR).trim_end_matches('/').to_owned();
        let auth_url = read(AUTH_URL_VAR).trim_end_matches('/').to_owned();
        let auth_key = read(AUTH_KEY_VAR);

        (Self { api_url, auth_url, auth_key }, errors)
    }

    /// Read from the process environment.
    pub fn from_env() -> (Self, Vec<ConfigError>) {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    #[must_use]
    pub fn auth_configured(&self) -> bool {
        !self.auth_url.is_empty() && !self.auth_key.is_empty()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
