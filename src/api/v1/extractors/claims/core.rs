use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;

use crate::middleware::auth::Locals;
use crate::services::authorizer::Claims;
use crate::state::AppState;

/// Handler で claims を受け取るための extractor
/// gate が Locals に claims を insert 済みである前提
/// 見つからない場合 (gate 未適用 / skip されたリクエスト) は gate と同じ unauthorized responder で返す
pub struct ClaimsExtractor(pub Claims);

impl FromRequestParts<AppState> for ClaimsExtractor {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Locals>()
            .and_then(|locals| locals.get(state.context_key()))
            .cloned();

        match claims {
            Some(claims) => Ok(ClaimsExtractor(claims)),
            None => Err((state.gate.config().unauthorized)(&*parts)),
        }
    }
}
