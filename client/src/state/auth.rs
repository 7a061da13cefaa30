//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `provide_auth` builds the session store, the API client and the
//! [`AuthContext`] once, at the app root. The context's observer writes every
//! transition into an `RwSignal<AuthState>`, which route guards, the navbar
//! and pages read. UI code never writes the signal itself.
//!
//! During server render the context is never mounted, so the signal stays
//! unresolved and guarded routes render their placeholder.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use api::AuthContext;
pub use api::AuthState;
use leptos::prelude::*;

use crate::net::api::{BrowserApi, BrowserSessionStore, build_services};
use crate::util::config;

/// Handles pages use to talk to the session store and the document API.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<AuthContext<BrowserSessionStore>>,
    pub store: Arc<BrowserSessionStore>,
    pub api: Arc<BrowserApi>,
}

/// Build services, provide them and the auth signal, and mount the auth
/// context in the browser.
pub fn provide_auth() {
    let signal = RwSignal::new(AuthState::default());
    let endpoints = config::endpoints();
    let (store, api) = build_services(&endpoints);
    let auth = Arc::new(AuthContext::new(Arc::clone(&store), move |state: &AuthState| {
        let _ = signal.try_set(state.clone());
    }));
    let services = Services { auth, store, api: Arc::new(api) };

    provide_context(signal);
    provide_context(services.clone());

    #[cfg(feature = "hydrate")]
    {
        let mount = services.clone();
        leptos::task::spawn_local(async move {
            if let Some(fragment) = crate::net::api::take_redirect_fragment() {
                if let Err(e) = mount.store.complete_redirect(&fragment).await {
                    log::error!("auth: oauth redirect failed: {e}");
                }
            }
            if let Err(e) = mount.auth.mount().await {
                log::error!("auth: initial session fetch failed: {e}");
            }
        });
    }

    on_cleanup(move || services.auth.teardown());
}

/// Name shown in the dashboard greeting.
pub fn greeting_name(state: &AuthState) -> String {
    state.user.as_ref().map(|u| u.display_name().to_owned()).unwrap_or_default()
}
