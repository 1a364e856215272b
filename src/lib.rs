//! Bearer-token authentication gate for axum, plus a cryptographically strong
//! token generator for minting the tokens it verifies.
//!
//! - [`services::token`]: `generate_token` / `new_token`
//! - [`services::authorizer`]: the `Authorizer` trait and its strategies
//! - [`middleware::auth`]: `AuthGate`, its configuration and router wiring
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

pub use middleware::auth::{AuthGate, GateConfig, Locals};
pub use services::authorizer::{Authorizer, Claims};
pub use services::token::{TokenConfig, TokenError, generate_token, new_token};
