/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - gate は app.rs で Router 全体に掛ける (skip 判定は AUTH_SKIP_PATHS)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::me::me;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
