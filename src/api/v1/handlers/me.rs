/*
 * Responsibility
 * - GET /api/v1/me
 * - gate が付与した claims をそのまま JSON で返す
 */
use axum::Json;

use crate::api::v1::extractors::ClaimsExtractor;
use crate::services::authorizer::Claims;

pub async fn me(ClaimsExtractor(claims): ClaimsExtractor) -> Json<Claims> {
    Json(claims)
}
