//! Documents uploaded by the signed-in user.

use api::actions::documents;
use api::types::Document;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::Services;

#[component]
pub fn UserDocumentsPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let items = RwSignal::new(Vec::<Document>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match documents::load_my_documents(&services.api).await {
            Ok(list) => items.set(list),
            Err(e) => error.set(Some(e.message)),
        }
        loading.set(false);
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = services;

    view! {
        <section class="user-documents">
            <h2>"My Uploaded Documents"</h2>
            <A href="/dashboard/upload-document" attr:class="btn btn--primary">"Upload New Document"</A>
            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading your documents..."</p> }>
                <Show
                    when=move || error.get().is_none()
                    fallback=move || view! { <p class="page-error">{move || error.get().unwrap_or_default()}</p> }
                >
                    <Show
                        when=move || !items.read().is_empty()
                        fallback=|| view! { <p>{documents::NO_DOCUMENTS}</p> }
                    >
                        <ul class="user-documents__rows">
                            <For each=move || items.get() key=|doc| doc.id let:doc>
                                <li class="user-documents__row">
                                    <span>{documents::document_row(&doc)}</span>
                                    <A href=format!("/dashboard/documents/{}", doc.id) attr:class="btn">"View/Manage"</A>
                                </li>
                            </For>
                        </ul>
                    </Show>
                </Show>
            </Show>
        </section>
    }
}
