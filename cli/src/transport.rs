//! `Transport` over reqwest for the command-line client.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use api::error::TransportError;
use api::transport::{FormField, HttpRequest, HttpResponse, Method, RequestBody, Transport};
use reqwest::multipart::{Form, Part};

#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(to_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Multipart(fields) => builder.multipart(multipart_form(fields)?),
        };

        tracing::debug!(method = request.method.as_str(), url = %request.url, "http request");
        let response = builder.send().await.map_err(|e| TransportError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TransportError::Body(e.to_string()))?;
        tracing::debug!(status, "http response");
        Ok(HttpResponse::new(status, body))
    }
}

fn to_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn multipart_form(fields: Vec<FormField>) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File { name, file_name, content_type, bytes } => {
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| TransportError::Request(e.to_string()))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
