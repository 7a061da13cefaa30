//! Public landing page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::signed_in_redirect;
use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(path) = signed_in_redirect(&auth.get()) {
            navigate(path, NavigateOptions::default());
        }
    });

    view! {
        <div class="home-page">
            <Show
                when=move || !auth.get().loading
                fallback=|| view! { <p>"Loading..."</p> }
            >
                <h1>"Welcome to InstaShare! Please login."</h1>
                <A href="/login" attr:class="btn btn--primary">"Login"</A>
            </Show>
        </div>
    }
}
