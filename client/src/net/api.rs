//! Browser wiring of the session store and the document API client.
//!
//! Client-side (hydrate): gloo-net transport, `localStorage` persistence,
//! JS clock, `window.location` for the OAuth hand-off.
//! Server-side (SSR): same types, but every request fails with
//! `TransportError::Unavailable`, so pages stay on their loading state.
//!
//! ERROR HANDLING
//! ==============
//! Missing configuration is logged once when the services are built. The
//! session store then answers `AuthError::NotConfigured` and API calls fail
//! at request time; nothing here panics during hydration.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use api::config::Endpoints;
use api::error::AuthError;
use api::{ApiClient, AuthServiceStore};

use super::storage::LocalStoragePersistence;
use super::transport::GlooTransport;

pub type BrowserSessionStore = AuthServiceStore<GlooTransport, LocalStoragePersistence>;
pub type BrowserApi = ApiClient<GlooTransport, BrowserSessionStore>;

/// Build the session store and the API client sharing it.
pub fn build_services(endpoints: &Endpoints) -> (Arc<BrowserSessionStore>, BrowserApi) {
    let store = Arc::new(
        AuthServiceStore::new(GlooTransport, LocalStoragePersistence, endpoints)
            .with_clock(browser_now)
            .with_redirect(assign_location),
    );
    let api = ApiClient::new(GlooTransport, Arc::clone(&store), endpoints.api_url.clone());
    (store, api)
}

/// Unix seconds from the JS clock; `SystemTime` is unavailable on wasm.
fn browser_now() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0) as i64;
        secs
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

fn assign_location(url: &str) -> Result<(), AuthError> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window().ok_or_else(|| AuthError::Redirect("no window".to_owned()))?;
        window
            .location()
            .set_href(url)
            .map_err(|e| AuthError::Redirect(format!("{e:?}")))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err(AuthError::Redirect("not available on server".to_owned()))
    }
}

/// `scheme://host[:port]` of the current page, or empty on the server.
pub fn page_origin() -> String {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window().and_then(|w| w.location().origin().ok()).unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}

/// Take the OAuth tokens the provider left in the URL fragment, and strip
/// them from the address bar so a reload does not replay them.
pub fn take_redirect_fragment() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window()?;
        let location = window.location();
        let hash = location.hash().ok()?;
        if !is_auth_fragment(&hash) {
            return None;
        }
        let path = location.pathname().unwrap_or_default();
        let search = location.search().unwrap_or_default();
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&strip_fragment(&path, &search)));
        }
        Some(hash)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn is_auth_fragment(hash: &str) -> bool {
    let raw = hash.trim_start_matches('#');
    raw.split('&')
        .filter_map(|pair| pair.split_once('=').map(|(key, _)| key).or(Some(pair)))
        .any(|key| matches!(key, "access_token" | "error" | "error_description"))
}

#[cfg(any(test, feature = "hydrate"))]
fn strip_fragment(path: &str, search: &str) -> String {
    let path = if path.is_empty() { "/" } else { path };
    format!("{path}{search}")
}
