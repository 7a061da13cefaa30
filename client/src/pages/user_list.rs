//! List of every API user.

use api::actions::users;
use api::types::User;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::Services;

#[component]
pub fn UserListPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let items = RwSignal::new(Vec::<User>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match users::load_users(&services.api).await {
            Ok(list) => items.set(list),
            Err(e) => error.set(Some(e.message)),
        }
        loading.set(false);
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = services;

    view! {
        <section class="user-list">
            <h2>"User List"</h2>
            <A href=format!("/dashboard/users/{}", users::NEW_USER_SEGMENT) attr:class="btn btn--primary">
                "Create New User"
            </A>
            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading users..."</p> }>
                <Show
                    when=move || error.get().is_none()
                    fallback=move || view! { <p class="page-error">{move || error.get().unwrap_or_default()}</p> }
                >
                    <ul class="user-list__rows">
                        <For each=move || items.get() key=|user| user.id let:user>
                            <li class="user-list__row">
                                <span>{users::user_row(&user)}</span>
                                <A href=format!("/dashboard/users/{}", user.id) attr:class="btn">"View/Edit"</A>
                            </li>
                        </For>
                    </ul>
                </Show>
            </Show>
        </section>
    }
}
