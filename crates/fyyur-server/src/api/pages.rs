use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub status: &'static str,
    pub version: &'static str,
}

fn status() -> ApiStatus {
    ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }
}

/// GET /
pub async fn home() -> Json<ApiStatus> {
    Json(status())
}

/// GET /healthz
pub async fn healthz() -> Json<ApiStatus> {
    Json(status())
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
