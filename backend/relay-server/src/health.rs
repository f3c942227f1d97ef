use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub const HEALTH_OK: &str = "Health OK";

/// GET /health - liveness only; does not touch the queue or the graph
pub async fn health() -> Response {
    (StatusCode::OK, Json(HEALTH_OK)).into_response()
}
