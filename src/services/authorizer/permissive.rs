use async_trait::async_trait;

use super::{Authorizer, Claims};

/// Accepts any non-empty token with an empty claim set.
///
/// This is the gate's fallback when no authorizer is configured. It verifies
/// nothing and must be replaced for real deployments.
#[derive(Debug, Clone, Copy)]
pub struct PermissiveAuthorizer;

impl PermissiveAuthorizer {
    pub fn new() -> Self {
        tracing::warn!("permissive authorizer in use: every non-empty bearer token is accepted");
        Self
    }
}

impl Default for PermissiveAuthorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authorizer for PermissiveAuthorizer {
    async fn resolve(&self, token: &str) -> Option<Claims> {
        if token.is_empty() {
            return None;
        }
        Some(Claims::new())
    }
}
