//! Document upload form.
//!
//! Type and size are checked against the picked file's metadata before its
//! content is read, so an oversized file is rejected without loading it.

#[cfg(test)]
#[path = "document_upload_test.rs"]
mod document_upload_test;

use api::actions::documents::{self, UploadDraft};
use api::validation::{self, ValidationError};
use leptos::html::Input;
use leptos::prelude::*;

use crate::state::auth::Services;
use crate::state::flash::Flash;
use crate::util::dom::{PickedFile, picked_file, read_picked_file};

fn precheck(name: &str, file_type: &str, picked: Option<&PickedFile>) -> Result<(), ValidationError> {
    validation::check_upload(name, file_type, picked.map(|f| (f.name.as_str(), f.size)))
}

#[component]
pub fn DocumentUploadPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let flash = expect_context::<Flash>();
    let name = RwSignal::new(String::new());
    let file_type = RwSignal::new(String::new());
    let file_input = NodeRef::<Input>::new();
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let message = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        message.set(None);
        let name_value = name.get_untracked();
        let type_value = file_type.get_untracked();
        if let Err(e) = precheck(&name_value, &type_value, picked_file(file_input).as_ref()) {
            error.set(Some(e.to_string()));
            return;
        }
        busy.set(true);
        let services = services.clone();
        leptos::task::spawn_local(async move {
            match read_picked_file(file_input).await {
                Ok(file) => {
                    let draft = UploadDraft { name: name_value, file_type: type_value, file: Some(file) };
                    match documents::upload_document(&services.api, &draft).await {
                        Ok(notice) => flash.show(notice, message),
                        Err(e) => error.set(Some(e.message)),
                    }
                }
                Err(e) => {
                    log::error!("upload: reading file failed: {e}");
                    error.set(Some(documents::UPLOAD_FAILED.to_owned()));
                }
            }
            busy.set(false);
        });
    };

    view! {
        <section class="document-upload">
            <h2>"Upload Document"</h2>
            <form class="document-upload__form" on:submit=on_submit>
                <label class="form-field">
                    <span class="form-field__label">"Document Name:"</span>
                    <input
                        class="form-field__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-field">
                    <span class="form-field__label">"Document Type (e.g., pdf, docx, zip):"</span>
                    <input
                        class="form-field__input"
                        type="text"
                        prop:value=move || file_type.get()
                        on:input=move |ev| file_type.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-field">
                    <span class="form-field__label">"Select File (max 500 MB):"</span>
                    <input class="form-field__input" type="file" accept=".pdf,.docx,.zip" node_ref=file_input/>
                </label>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Uploading..." } else { "Upload" }}
                </button>
            </form>
            <Show when=move || error.get().is_some()>
                <p class="page-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || message.get().is_some()>
                <p class="page-message">{move || message.get().unwrap_or_default()}</p>
            </Show>
        </section>
    }
}
