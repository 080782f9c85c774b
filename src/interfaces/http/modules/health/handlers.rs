//! Health check handler

use axum::Json;

use crate::interfaces::http::common::OkResponse;

/// Liveness only; the database is not consulted.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = OkResponse)
    )
)]
pub async fn health_check() -> Json<OkResponse> {
    Json(OkResponse::ok())
}
