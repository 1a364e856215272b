/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - 起動時のエラー (ConfigError / AuthorizerError) を統一的に変換
 *
 * Notes
 * - HTTP の 401 は AppError を経由しない (gate / ClaimsExtractor とも UnauthorizedResponder が直接返す)
 */
use thiserror::Error;

use crate::config::ConfigError;
use crate::services::authorizer::AuthorizerError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Authorizer(#[from] AuthorizerError),

    #[error("refusing to start: {0}")]
    Startup(&'static str),

    #[error("internal server error")]
    Internal,
}
