use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use super::{Authorizer, AuthorizerError, Claims};

/// Exact-match lookup of pre-shared tokens.
///
/// Loaded from JSON shaped as `{ "<token>": { "<claim>": "<value>" } }`.
#[derive(Clone, Default)]
pub struct StaticTokenAuthorizer {
    tokens: HashMap<String, Claims>,
}

impl fmt::Debug for StaticTokenAuthorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Token values are secrets
        f.debug_struct("StaticTokenAuthorizer")
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

impl StaticTokenAuthorizer {
    pub fn new(tokens: HashMap<String, Claims>) -> Self {
        Self { tokens }
    }

    pub fn from_json(json: &str) -> Result<Self, AuthorizerError> {
        let tokens: HashMap<String, Claims> = serde_json::from_str(json)?;
        Ok(Self::new(tokens))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AuthorizerError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| AuthorizerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let authorizer = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            tokens = authorizer.len(),
            "loaded static bearer tokens"
        );
        Ok(authorizer)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl Authorizer for StaticTokenAuthorizer {
    async fn resolve(&self, token: &str) -> Option<Claims> {
        self.tokens.get(token).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKENS: &str = r#"{
        "1HTWgKFX6zaCb5pwpH4RKJz7": {"user": "john", "email": "john@example.com", "id": "42"},
        "service-token": {}
    }"#;

    #[tokio::test]
    async fn resolves_known_tokens() {
        let auth = StaticTokenAuthorizer::from_json(TOKENS).unwrap();
        let claims = auth.resolve("1HTWgKFX6zaCb5pwpH4RKJz7").await.unwrap();
        assert_eq!(claims.get("user"), Some("john"));
        assert_eq!(claims.len(), 3);
    }

    #[tokio::test]
    async fn empty_claims_still_authorize() {
        let auth = StaticTokenAuthorizer::from_json(TOKENS).unwrap();
        assert_eq!(auth.resolve("service-token").await, Some(Claims::new()));
    }

    #[tokio::test]
    async fn unknown_token_is_none() {
        let auth = StaticTokenAuthorizer::from_json(TOKENS).unwrap();
        assert_eq!(auth.resolve("123456").await, None);
        assert_eq!(auth.resolve("").await, None);
    }

    #[test]
    fn non_string_claim_values_are_rejected() {
        let err = StaticTokenAuthorizer::from_json(r#"{"t": {"id": 42}}"#).unwrap_err();
        assert!(matches!(err, AuthorizerError::Json(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = StaticTokenAuthorizer::from_file("/nonexistent/tokens.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tokens.json"));
    }

    #[test]
    fn debug_hides_tokens() {
        let auth = StaticTokenAuthorizer::from_json(TOKENS).unwrap();
        assert!(!format!("{auth:?}").contains("1HTWgKFX6zaCb5pwpH4RKJz7"));
    }
}
