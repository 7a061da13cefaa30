//! File-input helpers for the upload form.
//!
//! The picked file's metadata is read first so the form can validate type
//! and size before the (possibly large) content is pulled into memory.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use api::types::FilePayload;
use leptos::html::Input;
use leptos::prelude::*;

/// Name, size and MIME type of the file picked in an `<input type="file">`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub size: u64,
    pub content_type: String,
}

pub fn picked_file(input: NodeRef<Input>) -> Option<PickedFile> {
    #[cfg(feature = "hydrate")]
    {
        let file = first_file(input)?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let size = file.size() as u64;
        Some(PickedFile { name: file.name(), size, content_type: file.type_() })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = input;
        None
    }
}

/// Read the picked file's bytes.
pub async fn read_picked_file(input: NodeRef<Input>) -> Result<FilePayload, String> {
    #[cfg(feature = "hydrate")]
    {
        let file = first_file(input).ok_or_else(|| "no file selected".to_owned())?;
        let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| format!("{e:?}"))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        Ok(FilePayload { file_name: file.name(), content_type: content_type_or_default(&file.type_()), bytes })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = input;
        Err("file input not available on server".to_owned())
    }
}

#[cfg(feature = "hydrate")]
fn first_file(input: NodeRef<Input>) -> Option<web_sys::File> {
    input.get_untracked()?.files()?.get(0)
}

/// Browsers report an empty type for unknown extensions.
fn content_type_or_default(content_type: &str) -> String {
    if content_type.trim().is_empty() { "application/octet-stream".to_owned() } else { content_type.to_owned() }
}
