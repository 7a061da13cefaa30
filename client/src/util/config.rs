//! Endpoint configuration baked in at build time.
//!
//! The WASM bundle has no process environment, so the three variables are
//! read with `option_env!` when the client is compiled. Missing values are
//! logged once; the affected calls fail at request time.

use api::config::{self, Endpoints};

pub fn endpoints() -> Endpoints {
    let (endpoints, errors) = Endpoints::from_lookup(build_env);
    for err in &errors {
        log::error!("config: {err}");
    }
    endpoints
}

fn build_env(var: &str) -> Option<String> {
    let value = match var {
        config::API_URL_VAR => option_env!("INSTASHARE_API_URL"),
        config::AUTH_URL_VAR => option_env!("INSTASHARE_AUTH_URL"),
        config::AUTH_KEY_VAR => option_env!("INSTASHARE_AUTH_KEY"),
        _ => None,
    };
    value.map(str::to_owned)
}
