//! Dashboard header with the signed-in user's greeting and logout.

use api::actions::auth as auth_actions;
use api::guard::LOGIN_PATH;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::{AuthState, Services, greeting_name};

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let services = expect_context::<Services>();
    let navigate = use_navigate();
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_logout = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let services = services.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match auth_actions::log_out(&services.auth).await {
                Ok(()) => {
                    error.set(None);
                    navigate(LOGIN_PATH, NavigateOptions::default());
                }
                Err(e) => error.set(Some(e.message)),
            }
            busy.set(false);
        });
    };

    view! {
        <header class="navbar">
            <h1 class="navbar__title">"Welcome to InstaShare Dashboard"</h1>
            <span class="navbar__spacer"></span>
            <span class="navbar__greeting">{move || format!("Hello, {}!", greeting_name(&auth.get()))}</span>
            <button class="btn navbar__logout" on:click=on_logout disabled=move || busy.get() title="Logout">
                "Logout"
            </button>
            <Show when=move || error.get().is_some()>
                <p class="navbar__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </header>
    }
}
