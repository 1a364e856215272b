pub mod bearer;
pub mod gate;
pub mod locals;

pub use gate::{
    AuthGate, DEFAULT_CONTEXT_KEY, GateConfig, GateConfigBuilder, SkipPredicate,
    UnauthorizedResponder, default_unauthorized, parse_bearer,
};
pub use locals::Locals;
