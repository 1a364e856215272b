//! Bearer authentication gate.
//!
//! Per request, in order:
//! 1. skip predicate matches -> pass through untouched
//! 2. `Authorization: Bearer <token>` parsed (scheme case-insensitive, one separator)
//! 3. authorizer resolves the token
//! 4. `Some(claims)` -> attach and continue, anything else -> unauthorized responder
use std::fmt;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::locals::Locals;
use crate::services::authorizer::{Authorizer, Claims, PermissiveAuthorizer};

/// Key under which claims are stored in [`Locals`] unless configured otherwise.
pub const DEFAULT_CONTEXT_KEY: &str = "claims";

const BEARER: &str = "Bearer";

pub type SkipPredicate = Arc<dyn Fn(&Parts) -> bool + Send + Sync>;
pub type UnauthorizedResponder = Arc<dyn Fn(&Parts) -> Response + Send + Sync>;

/// 401, empty body, `WWW-Authenticate: Bearer`.
pub fn default_unauthorized(_parts: &Parts) -> Response {
    (StatusCode::UNAUTHORIZED, [(header::WWW_AUTHENTICATE, BEARER)]).into_response()
}

/// Extract the token from an `Authorization` header value.
///
/// The first six characters must spell `bearer` in any case; the seventh is the
/// separator and the rest, up to the end of the value, is the token.
pub fn parse_bearer(value: &str) -> Option<&str> {
    let scheme = value.get(..BEARER.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER) {
        return None;
    }
    let token = value.get(BEARER.len() + 1..)?;
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[derive(Clone)]
pub struct GateConfig {
    pub skip: Option<SkipPredicate>,
    pub authorizer: Arc<dyn Authorizer>,
    pub unauthorized: UnauthorizedResponder,
    pub context_key: String,
}

impl fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateConfig")
            .field("skip", &self.skip.is_some())
            .field("context_key", &self.context_key)
            .finish_non_exhaustive()
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        GateConfigBuilder::default().build()
    }
}

impl GateConfig {
    pub fn builder() -> GateConfigBuilder {
        GateConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct GateConfigBuilder {
    skip: Option<SkipPredicate>,
    authorizer: Option<Arc<dyn Authorizer>>,
    unauthorized: Option<UnauthorizedResponder>,
    context_key: Option<String>,
}

impl GateConfigBuilder {
    pub fn skip<F>(mut self, skip: F) -> Self
    where
        F: Fn(&Parts) -> bool + Send + Sync + 'static,
    {
        self.skip = Some(Arc::new(skip));
        self
    }

    pub fn authorizer(mut self, authorizer: impl Authorizer + 'static) -> Self {
        self.authorizer = Some(Arc::new(authorizer));
        self
    }

    pub fn shared_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    pub fn unauthorized<F>(mut self, unauthorized: F) -> Self
    where
        F: Fn(&Parts) -> Response + Send + Sync + 'static,
    {
        self.unauthorized = Some(Arc::new(unauthorized));
        self
    }

    pub fn context_key(mut self, key: impl Into<String>) -> Self {
        self.context_key = Some(key.into());
        self
    }

    /// Merge the configured fields over the defaults.
    ///
    /// An empty context key counts as unset.
    pub fn build(self) -> GateConfig {
        GateConfig {
            skip: self.skip,
            authorizer: self
                .authorizer
                .unwrap_or_else(|| Arc::new(PermissiveAuthorizer::new())),
            unauthorized: self
                .unauthorized
                .unwrap_or_else(|| Arc::new(default_unauthorized)),
            context_key: self
                .context_key
                .filter(|key| !key.is_empty())
                .unwrap_or_else(|| DEFAULT_CONTEXT_KEY.to_string()),
        }
    }
}

/// The gate itself. Cheap to clone; configuration is shared read-only.
#[derive(Clone, Debug)]
pub struct AuthGate {
    config: Arc<GateConfig>,
}

impl AuthGate {
    pub fn new(config: GateConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub async fn handle(&self, req: Request<Body>, next: Next) -> Response {
        let (mut parts, body) = req.into_parts();

        if let Some(skip) = &self.config.skip
            && skip(&parts)
        {
            tracing::trace!(path = %parts.uri.path(), "auth skipped");
            return next.run(Request::from_parts(parts, body)).await;
        }

        match self.authorize(&parts.headers).await {
            Some(claims) => {
                self.attach(&mut parts, claims);
                next.run(Request::from_parts(parts, body)).await
            }
            None => (self.config.unauthorized)(&parts),
        }
    }

    /// Header parsing plus authorizer call, without touching the request.
    pub async fn authorize(&self, headers: &HeaderMap) -> Option<Claims> {
        let Some(value) = headers.get(header::AUTHORIZATION) else {
            tracing::debug!("missing authorization header");
            return None;
        };
        let Ok(value) = value.to_str() else {
            tracing::debug!("authorization header is not visible ascii");
            return None;
        };
        let Some(token) = parse_bearer(value) else {
            tracing::debug!("malformed bearer authorization header");
            return None;
        };

        let claims = self.config.authorizer.resolve(token).await;
        if claims.is_none() {
            tracing::debug!("bearer token not authorized");
        }
        claims
    }

    fn attach(&self, parts: &mut Parts, claims: Claims) {
        let mut locals = parts.extensions.remove::<Locals>().unwrap_or_default();
        locals.insert(self.config.context_key.clone(), claims.clone());
        parts.extensions.insert(locals);
        parts.extensions.insert(claims);
    }
}
