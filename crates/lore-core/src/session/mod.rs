//! Session, role resolution and access gating.

pub mod gate;
pub mod model;
pub mod provider;

pub use gate::{GateDecision, decide};
pub use model::{Role, Session};
pub use provider::IdentityProvider;
