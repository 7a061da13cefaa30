//! `Transport` over the browser fetch API (gloo-net).
//!
//! Server render has no business talking to the API, so without `hydrate`
//! every send fails with [`TransportError::Unavailable`].

#![allow(clippy::unused_async)]

use api::error::TransportError;
use api::transport::{HttpRequest, HttpResponse, Transport};
#[cfg(feature = "hydrate")]
use api::transport::{FormField, Method, RequestBody};

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[async_trait::async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let built = match request.body {
                RequestBody::Empty => builder.build(),
                RequestBody::Json(value) => builder.body(value.to_string()),
                RequestBody::Multipart(fields) => builder.body(form_data(&fields)?),
            }
            .map_err(|e| TransportError::Request(e.to_string()))?;

            let response = built.send().await.map_err(|e| TransportError::Request(e.to_string()))?;
            let status = response.status();
            let body = response.text().await.map_err(|e| TransportError::Body(e.to_string()))?;
            Ok(HttpResponse::new(status, body))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(TransportError::Unavailable("browser transport during server render"))
        }
    }
}

/// Build a `FormData` body; the browser picks the multipart boundary.
#[cfg(feature = "hydrate")]
fn form_data(fields: &[FormField]) -> Result<web_sys::FormData, TransportError> {
    let to_err = |e: wasm_bindgen::JsValue| TransportError::Request(format!("{e:?}"));
    let form = web_sys::FormData::new().map_err(to_err)?;
    for field in fields {
        match field {
            FormField::Text { name, value } => form.append_with_str(name, value).map_err(to_err)?,
            FormField::File { name, file_name, content_type, bytes } => {
                let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()).into());
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(content_type);
                let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(to_err)?;
                form.append_with_blob_and_filename(name, &blob, file_name).map_err(to_err)?;
            }
        }
    }
    Ok(form)
}
