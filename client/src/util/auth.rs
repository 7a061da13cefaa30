//! Route guard for the authenticated part of the app.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every `/dashboard` route renders inside [`RouteGuard`]. The decision is
//! `api::guard::decide`; this module only renders it and performs the
//! history-replacing redirect.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use api::guard::{self, GuardDecision};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

/// Redirect whenever auth has resolved to anonymous. The login route replaces
/// the guarded entry, so Back does not return to it.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(path) = redirect_target(&auth.get()) {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Login path when the guard must redirect.
pub fn redirect_target(state: &AuthState) -> Option<&'static str> {
    match guard::decide(state) {
        GuardDecision::Redirect(path) => Some(path),
        GuardDecision::Placeholder | GuardDecision::Render => None,
    }
}

/// Text rendered instead of the protected subtree.
pub fn fallback_text(decision: GuardDecision) -> &'static str {
    match decision {
        GuardDecision::Placeholder => guard::PLACEHOLDER_TEXT,
        GuardDecision::Redirect(_) | GuardDecision::Render => "",
    }
}

/// Renders `children` only for a signed-in user.
#[component]
pub fn RouteGuard(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());
    let decision = Memo::new(move |_| guard::decide(&auth.get()));

    view! {
        <Show
            when=move || decision.get() == GuardDecision::Render
            fallback=move || view! { <p class="route-guard__placeholder">{move || fallback_text(decision.get())}</p> }
        >
            {children()}
        </Show>
    }
}
