//! Login page supporting OAuth providers and email + password.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use api::actions::auth as auth_actions;
use api::types::OAuthProvider;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::signed_in_redirect;
use crate::net::api::page_origin;
use crate::state::auth::{AuthState, Services};

fn provider_button_label(provider: OAuthProvider) -> String {
    format!("Sign in with {}", provider.label())
}

fn provider_button_class(provider: OAuthProvider) -> String {
    format!("login-button login-button--{}", provider.as_str())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let services = expect_context::<Services>();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // Signing in flips the auth signal; leave once it does.
    Effect::new(move || {
        if let Some(path) = signed_in_redirect(&auth.get()) {
            navigate(path, NavigateOptions::default());
        }
    });

    let password_services = services.clone();
    let on_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        error.set(None);
        let services = password_services.clone();
        let email_value = email.get();
        let password_value = password.get();
        leptos::task::spawn_local(async move {
            if let Err(e) = auth_actions::sign_in_with_password(&services.auth, &email_value, &password_value).await {
                error.set(Some(e.message));
            }
            busy.set(false);
        });
    };

    let on_provider = move |provider: OAuthProvider| {
        if busy.get() {
            return;
        }
        error.set(None);
        let services = services.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = auth_actions::sign_in_with_oauth(&services.auth, provider, &page_origin()).await {
                error.set(Some(e.message));
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Login to InstaShare"</h1>
                <form class="login-form" on:submit=on_password>
                    <input
                        class="login-input"
                        type="email"
                        required
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        required
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Login with Email"
                    </button>
                </form>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">"Or"</p>
                {OAuthProvider::ALL
                    .into_iter()
                    .map(|provider| {
                        let on_provider = on_provider.clone();
                        view! {
                            <button
                                class=provider_button_class(provider)
                                type="button"
                                on:click=move |_| on_provider(provider)
                            >
                                {provider_button_label(provider)}
                            </button>
                        }
                    })
                    .collect_view()}
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
