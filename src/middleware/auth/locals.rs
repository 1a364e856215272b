use std::collections::HashMap;

use crate::services::authorizer::Claims;

/// Per-request claim storage, keyed by the gate's context key.
///
/// Lives in the request extensions, so it is dropped with the request.
#[derive(Debug, Clone, Default)]
pub struct Locals(HashMap<String, Claims>);

impl Locals {
    pub fn get(&self, key: &str) -> Option<&Claims> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, claims: Claims) {
        self.0.insert(key.into(), claims);
    }
}
