/*
 * Responsibility
 * - GET /health (疎通用)
 * - AUTH_SKIP_PATHS の既定値に含まれるので gate を通らない
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
