/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: bearer gate (ヘッダ抽出 → Authorizer → claims 付与 / 401)
 * - http / cors / security_headers: Router 全体に掛ける横断的な layer
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
