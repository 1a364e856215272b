//! Token -> claims resolution.
//!
//! The gate only knows the [`Authorizer`] trait. Unknown or invalid tokens are
//! reported as `None`; an authorizer never fails a request by erroring. Backing
//! store failures have to be folded into that decision by the implementation.
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

pub mod claims;
pub mod func;
pub mod jwt;
pub mod permissive;
pub mod static_map;

pub use claims::Claims;
pub use func::FnAuthorizer;
pub use jwt::JwtAuthorizer;
pub use permissive::PermissiveAuthorizer;
pub use static_map::StaticTokenAuthorizer;

#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Resolve `token` to its claims, or `None` when it is not authorized.
    async fn resolve(&self, token: &str) -> Option<Claims>;
}

/// Errors raised while constructing an authorizer (never per request).
#[derive(Debug, Error)]
pub enum AuthorizerError {
    #[error("read token file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse token map: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid jwt key: {0}")]
    Key(#[from] jsonwebtoken::errors::Error),
}
