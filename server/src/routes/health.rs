//! Health endpoints for load balancers and uptime checks.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

pub const SERVICE_NAME: &str = "instashare-web";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service_name: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok", service_name: SERVICE_NAME, version: env!("CARGO_PKG_VERSION") })
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
