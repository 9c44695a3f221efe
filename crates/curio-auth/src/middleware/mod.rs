//! Request-level authentication: the token gate and its axum extractors.

mod error;
mod extract;
mod gate;

pub use extract::{AuthState, BearerAuth, OptionalBearerAuth};
pub use gate::{AuthGate, GateMode};
