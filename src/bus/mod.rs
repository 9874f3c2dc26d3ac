//! Two-wire node bus: one coordinator, many responders

mod coordinator;
mod registry;
mod responder;

pub use coordinator::{Coordinator, CoordinatorError};
pub use registry::{REGISTRY_CAPACITY, SlaveRegistry};
pub use responder::Responder;
