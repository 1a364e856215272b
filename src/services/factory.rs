/// Factory: build the `AuthGate` from application `Config`.
use std::sync::Arc;

use axum::http::request::Parts;

use crate::config::Config;
use crate::error::AppError;
use crate::middleware::auth::{AuthGate, GateConfig};
use crate::services::authorizer::{
    Authorizer, JwtAuthorizer, PermissiveAuthorizer, StaticTokenAuthorizer,
};

/// Pick the authorizer: JWT key > static token file > permissive (development only).
pub fn build_authorizer(config: &Config) -> Result<Arc<dyn Authorizer>, AppError> {
    if let Some(jwt) = &config.auth_jwt {
        let auth = JwtAuthorizer::from_ed_pem(
            &jwt.public_key_pem,
            jwt.issuer.as_deref(),
            jwt.audience.as_deref(),
            jwt.leeway_seconds,
        )?;
        tracing::info!(issuer = ?jwt.issuer, audience = ?jwt.audience, "using jwt authorizer");
        return Ok(Arc::new(auth));
    }

    if let Some(path) = &config.auth_tokens_file {
        return Ok(Arc::new(StaticTokenAuthorizer::from_file(path)?));
    }

    if config.app_env.is_production() {
        return Err(AppError::Startup(
            "no authorizer configured (set AUTH_JWT_PUBLIC_KEY_PEM or AUTH_TOKENS_FILE)",
        ));
    }

    Ok(Arc::new(PermissiveAuthorizer::new()))
}

pub fn build_gate(config: &Config) -> Result<AuthGate, AppError> {
    let authorizer = build_authorizer(config)?;
    let skip_paths = config.auth_skip_paths.clone();

    let mut builder = GateConfig::builder()
        .shared_authorizer(authorizer)
        .context_key(config.auth_context_key.clone());

    if !skip_paths.is_empty() {
        builder = builder
            .skip(move |parts: &Parts| skip_paths.iter().any(|p| p == parts.uri.path()));
    }

    Ok(AuthGate::new(builder.build()))
}
