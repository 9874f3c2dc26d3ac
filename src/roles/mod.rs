//! Main-loop compositions for the three node firmwares
//!
//! Each role owns the main-loop half of its components and borrows the
//! interrupt-shared halves ([`PulseCapture`](crate::ir::PulseCapture),
//! [`OutputStage`](crate::output::OutputStage),
//! [`Responder`](crate::bus::Responder)), which the board code also hands to
//! its interrupt handlers.

mod master;
mod remote;
mod standalone;

pub use master::{MasterNode, MasterReport};
pub use remote::RemoteNode;
pub use standalone::StandaloneNode;
