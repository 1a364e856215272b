pub mod authorizer;
pub mod factory;
pub mod token;

pub use factory::build_gate;
