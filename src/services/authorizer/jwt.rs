use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use std::fmt;

use super::{Authorizer, AuthorizerError, Claims};

/// Verifies bearer tokens as signed JWTs and exposes their payload as claims.
///
/// - Signature, `exp` and (when configured) `iss`/`aud` are checked by `jsonwebtoken`.
/// - String claims are copied as-is, `null` claims are dropped, everything else
///   is rendered as compact JSON.
#[derive(Clone)]
pub struct JwtAuthorizer {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for JwtAuthorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("JwtAuthorizer")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtAuthorizer {
    /// EdDSA verifier. `public_key_pem` must be an Ed25519 public key in PEM format.
    pub fn from_ed_pem(
        public_key_pem: &str,
        issuer: Option<&str>,
        audience: Option<&str>,
        leeway_seconds: u64,
    ) -> Result<Self, AuthorizerError> {
        let decoding_key = DecodingKey::from_ed_pem(public_key_pem.as_bytes())?;
        Ok(Self::with_key(
            decoding_key,
            Algorithm::EdDSA,
            issuer,
            audience,
            leeway_seconds,
        ))
    }

    /// HS256 verifier with a shared secret.
    pub fn from_secret(
        secret: &[u8],
        issuer: Option<&str>,
        audience: Option<&str>,
        leeway_seconds: u64,
    ) -> Self {
        Self::with_key(
            DecodingKey::from_secret(secret),
            Algorithm::HS256,
            issuer,
            audience,
            leeway_seconds,
        )
    }

    fn with_key(
        decoding_key: DecodingKey,
        algorithm: Algorithm,
        issuer: Option<&str>,
        audience: Option<&str>,
        leeway_seconds: u64,
    ) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = leeway_seconds;
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)?;
        Ok(flatten(data.claims))
    }
}

fn flatten(payload: Map<String, Value>) -> Claims {
    payload
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect()
}

#[async_trait]
impl Authorizer for JwtAuthorizer {
    async fn resolve(&self, token: &str) -> Option<Claims> {
        match self.verify(token) {
            Ok(claims) => Some(claims),
            Err(err) => {
                tracing::warn!(error = %err, "jwt verification failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;

    const SECRET: &[u8] = b"test-secret";
    // 2100-01-01T00:00:00Z
    const FAR_FUTURE: u64 = 4_102_444_800;

    fn sign(payload: &Value) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            payload,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn valid_token_flattens_claims() {
        let auth = JwtAuthorizer::from_secret(SECRET, Some("gate-test"), None, 0);
        let token = sign(&json!({
            "iss": "gate-test",
            "sub": "john",
            "exp": FAR_FUTURE,
            "admin": true,
            "nickname": null,
        }));

        let claims = auth.resolve(&token).await.unwrap();
        assert_eq!(claims.get("sub"), Some("john"));
        assert_eq!(claims.get("admin"), Some("true"));
        assert_eq!(claims.get("exp"), Some("4102444800"));
        assert_eq!(claims.get("nickname"), None);
    }

    #[tokio::test]
    async fn tampered_signature_is_rejected() {
        let auth = JwtAuthorizer::from_secret(SECRET, None, None, 0);
        let mut token = sign(&json!({"sub": "john", "exp": FAR_FUTURE}));
        token.push('x');
        assert_eq!(auth.resolve(&token).await, None);
    }

    #[tokio::test]
    async fn wrong_issuer_is_rejected() {
        let auth = JwtAuthorizer::from_secret(SECRET, Some("expected"), None, 0);
        let token = sign(&json!({"iss": "other", "exp": FAR_FUTURE}));
        assert_eq!(auth.resolve(&token).await, None);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let auth = JwtAuthorizer::from_secret(SECRET, None, None, 0);
        let token = sign(&json!({"sub": "john", "exp": 1}));
        assert_eq!(auth.resolve(&token).await, None);
    }

    #[tokio::test]
    async fn opaque_token_is_rejected() {
        let auth = JwtAuthorizer::from_secret(SECRET, None, None, 0);
        assert_eq!(auth.resolve("1HTWgKFX6zaCb5pwpH4RKJz7").await, None);
    }

    #[test]
    fn bad_pem_is_an_error() {
        let err = JwtAuthorizer::from_ed_pem("not a pem", None, None, 60).unwrap_err();
        assert!(matches!(err, AuthorizerError::Key(_)));
    }
}
