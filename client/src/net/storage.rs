//! Session persistence in browser `localStorage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Keeps the session across reloads the way the hosted auth SDK does. The
//! hydrate-only read/write glue lives here so the session store stays
//! platform-neutral. During server render nothing is stored.

use api::session::SessionPersistence;
use api::types::Session;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const SESSION_KEY: &str = "instashare.auth.session";

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStoragePersistence;

impl SessionPersistence for LocalStoragePersistence {
    fn load(&self) -> Option<Session> {
        load_json(SESSION_KEY)
    }

    fn save(&self, session: &Session) {
        save_json(SESSION_KEY, session);
    }

    fn clear(&self) {
        remove(SESSION_KEY);
    }
}

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        let raw = storage.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        if storage.set_item(key, &raw).is_err() {
            log::warn!("storage: failed to write {key}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

pub fn remove(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}
