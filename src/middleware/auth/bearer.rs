//! Wires [`AuthGate`] into an axum `Router`.
use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use super::gate::AuthGate;

/// Put `gate` in front of every route of `router`.
///
/// ```ignore
/// let router = middleware::auth::bearer::apply(router, state.gate.clone());
/// ```
pub fn apply<S>(router: Router<S>, gate: AuthGate) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(gate, bearer_middleware))
}

async fn bearer_middleware(
    State(gate): State<AuthGate>,
    req: Request<Body>,
    next: Next,
) -> Response {
    gate.handle(req, next).await
}
