use async_trait::async_trait;

use super::{Authorizer, Claims};

/// Adapts a synchronous closure into an [`Authorizer`].
pub struct FnAuthorizer<F>(F);

impl<F> FnAuthorizer<F>
where
    F: Fn(&str) -> Option<Claims> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> Authorizer for FnAuthorizer<F>
where
    F: Fn(&str) -> Option<Claims> + Send + Sync,
{
    async fn resolve(&self, token: &str) -> Option<Claims> {
        (self.0)(token)
    }
}
