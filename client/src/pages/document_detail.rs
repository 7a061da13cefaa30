//! Document detail page (`/dashboard/documents/:id`): metadata edit, share
//! list and picker, delete and compression.
//!
//! SYSTEM CONTEXT
//! ==============
//! Edits go to a [`DocumentInfoUpdate`] draft; the fetched document is
//! replaced only after a successful save. Fetches are sequenced so a slow
//! response for a previous `:id` is dropped.

#[cfg(test)]
#[path = "document_detail_test.rs"]
mod document_detail_test;

use api::actions::documents::{self, DocumentDetail};
use api::actions::{Confirmation, Outcome};
use api::sequence::RequestSequence;
use api::types::{Document, DocumentInfoUpdate};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use super::route_id;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::form_field::FormField;
use crate::state::auth::Services;
use crate::state::flash::Flash;

/// Action waiting on the confirmation dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingAction {
    Delete,
    Compress,
}

impl PendingAction {
    fn prompt(self) -> &'static str {
        match self {
            Self::Delete => documents::DELETE_PROMPT,
            Self::Compress => documents::COMPRESSION_PROMPT,
        }
    }
}

/// `label: value` lines of the read-only metadata block.
fn metadata_rows(document: &Document) -> Vec<(&'static str, String)> {
    let or_dash = |v: Option<&str>| v.unwrap_or("-").to_owned();
    vec![
        ("Name", document.name.clone()),
        ("Type", document.doc_type.clone()),
        ("Size", or_dash(document.size.as_deref())),
        ("Status", document.status.map_or_else(|| "-".to_owned(), |s| s.to_string())),
        ("Uploaded at", or_dash(document.uploaded_at.as_deref().or(document.created_at.as_deref()))),
    ]
}

#[component]
pub fn DocumentDetailPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let flash = expect_context::<Flash>();
    let params = use_params_map();
    let document_id = Memo::new(move |_| route_id(params.read().get("id").as_deref()));

    let detail = RwSignal::new(None::<DocumentDetail>);
    let draft = RwSignal::new(DocumentInfoUpdate::default());
    let editing = RwSignal::new(false);
    let loading = RwSignal::new(true);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let message = RwSignal::new(None::<String>);
    let pending = RwSignal::new(None::<PendingAction>);
    let share_with = RwSignal::new(None::<i64>);

    let sequence = RequestSequence::new();
    let load_services = services.clone();
    Effect::new(move || {
        let current = document_id.get();
        let ticket = sequence.begin();
        detail.set(None);
        editing.set(false);
        error.set(None);
        message.set(None);
        pending.set(None);
        share_with.set(None);
        let Some(id) = current else {
            loading.set(false);
            error.set(Some(documents::NOT_FOUND.to_owned()));
            return;
        };
        loading.set(true);
        #[cfg(feature = "hydrate")]
        {
            let services = load_services.clone();
            leptos::task::spawn_local(async move {
                let result = documents::load_document_detail(&services.api, id).await;
                if !ticket.is_current() {
                    return;
                }
                match result {
                    Ok(loaded) => {
                        draft.set(DocumentInfoUpdate::from_document(&loaded.document));
                        detail.set(Some(loaded));
                    }
                    Err(e) => error.set(Some(e.message)),
                }
                loading.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&load_services, id, ticket);
    });

    let save_services = services.clone();
    let on_save = Callback::new(move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let Some(current) = detail.get_untracked().map(|d| d.document) else {
            return;
        };
        let submitted = draft.get_untracked();
        let services = save_services.clone();
        busy.set(true);
        error.set(None);
        message.set(None);
        leptos::task::spawn_local(async move {
            match documents::update_document(&services.api, &current, &submitted).await {
                Ok((saved, notice)) => {
                    draft.set(DocumentInfoUpdate::from_document(&saved));
                    detail.update(|d| {
                        if let Some(d) = d {
                            d.document = saved;
                        }
                    });
                    editing.set(false);
                    flash.show(notice, message);
                }
                Err(e) => error.set(Some(e.message)),
            }
            busy.set(false);
        });
    });

    let on_cancel_edit = move |_| {
        if let Some(loaded) = detail.get_untracked() {
            draft.set(DocumentInfoUpdate::from_document(&loaded.document));
        }
        editing.set(false);
        error.set(None);
    };

    let on_share = move |_| {
        let Some(id) = document_id.get_untracked() else {
            return;
        };
        message.set(None);
        match documents::share_document(id, share_with.get_untracked()) {
            Ok(notice) => flash.show(notice, message),
            Err(e) => error.set(Some(e.message)),
        }
    };

    let on_answer = Callback::new(move |confirmation: Confirmation| {
        let Some(action) = pending.get_untracked() else {
            return;
        };
        pending.set(None);
        let Some(id) = document_id.get_untracked() else {
            return;
        };
        let services = services.clone();
        leptos::task::spawn_local(async move {
            let result = match action {
                PendingAction::Delete => documents::delete_document(&services.api, id, confirmation).await,
                PendingAction::Compress => documents::start_compression(&services.api, id, confirmation).await,
            };
            match result {
                Ok(Outcome::Done(notice)) => flash.show(notice, message),
                Ok(Outcome::Cancelled) => {}
                Err(e) => error.set(Some(e.message)),
            }
        });
    });

    let editable = Signal::derive(move || editing.get());
    let name = Signal::derive(move || draft.with(|d| d.name.clone().unwrap_or_default()));
    let on_name = Callback::new(move |value: String| draft.update(|d| d.name = Some(value)));
    let doc_type = Signal::derive(move || draft.with(|d| d.doc_type.clone().unwrap_or_default()));
    let on_doc_type = Callback::new(move |value: String| draft.update(|d| d.doc_type = Some(value)));

    view! {
        <section class="document-detail">
            <h2>"Document Details"</h2>
            <Show when=move || error.get().is_some()>
                <p class="page-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || message.get().is_some()>
                <p class="page-message">{move || message.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading document details..."</p> }>
                <Show when=move || detail.read().is_some()>
                    <Show
                        when=move || editing.get()
                        fallback=move || view! {
                            <dl class="document-detail__meta">
                                {move || {
                                    detail
                                        .get()
                                        .map(|d| metadata_rows(&d.document))
                                        .unwrap_or_default()
                                        .into_iter()
                                        .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                                        .collect_view()
                                }}
                            </dl>
                            <button class="btn" type="button" on:click=move |_| editing.set(true)>"Edit"</button>
                        }
                    >
                        <form class="document-detail__form" on:submit=move |ev| on_save.run(ev)>
                            <FormField label="Name:" value=name on_input=on_name editable=editable required=true/>
                            <FormField label="Type:" value=doc_type on_input=on_doc_type editable=editable required=true/>
                            <div class="document-detail__actions">
                                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>"Save"</button>
                                <button class="btn" type="button" on:click=on_cancel_edit>"Cancel"</button>
                            </div>
                        </form>
                    </Show>

                    <div class="document-detail__actions">
                        <button class="btn" type="button" on:click=move |_| pending.set(Some(PendingAction::Compress))>
                            "Start Compression Job"
                        </button>
                        <button class="btn btn--danger" type="button" on:click=move |_| pending.set(Some(PendingAction::Delete))>
                            "Delete Document"
                        </button>
                    </div>

                    <h3>"Shared With"</h3>
                    <Show
                        when=move || detail.read().as_ref().is_some_and(|d| !d.shared_with.is_empty())
                        fallback=|| view! { <p>{documents::NOT_SHARED}</p> }
                    >
                        <ul class="document-detail__shares">
                            {move || {
                                detail
                                    .get()
                                    .map(|d| d.shared_with)
                                    .unwrap_or_default()
                                    .iter()
                                    .map(|user| view! { <li>{documents::shared_row(user)}</li> })
                                    .collect_view()
                            }}
                        </ul>
                    </Show>

                    <div class="document-detail__share">
                        <select
                            class="document-detail__share-select"
                            on:change=move |ev| share_with.set(event_target_value(&ev).parse().ok())
                        >
                            <option value="" selected=move || share_with.get().is_none()>"Select a user"</option>
                            {move || {
                                detail
                                    .get()
                                    .map(|d| d.available_users)
                                    .unwrap_or_default()
                                    .into_iter()
                                    .map(|user| {
                                        let id = user.id;
                                        view! {
                                            <option value=id.to_string() selected=move || share_with.get() == Some(id)>
                                                {format!("{} ({})", user.name, user.email)}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                        <button class="btn" type="button" on:click=on_share>"Share"</button>
                    </div>
                </Show>
            </Show>
            <Show when=move || pending.get().is_some()>
                <ConfirmDialog
                    message=pending.get_untracked().map(PendingAction::prompt).unwrap_or_default()
                    on_answer=on_answer
                />
            </Show>
        </section>
    }
}
