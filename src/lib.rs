#![no_std]

pub mod animation;
pub mod bus;
pub mod channel;
pub mod color;
pub mod config;
pub mod ir;
pub mod node;
pub mod output;
pub mod protocol;
pub mod roles;
pub mod state;

pub use animation::AnimationState;
pub use bus::{Coordinator, CoordinatorError, Responder, SlaveRegistry};
pub use channel::{Channel, CommandQueue, Receiver, Sender, TryReceiveError, TrySendError};
pub use color::{Animation, Rgb10};
pub use config::{BusConfig, IrConfig, NodeConfig, OutputConfig};
pub use ir::{CaptureAction, DecodedFrame, IrEvent, NecDecoder, PulseCapture, Span};
pub use node::{DispatchEffects, LightNode};
pub use output::{GammaTable, OutputStage, PwmFrame, PwmOutput};
pub use protocol::{AnimationId, MasterBroadcast, NodeCommand};
pub use roles::{MasterNode, RemoteNode, StandaloneNode};
pub use state::{Mode, NodeState};

pub use embassy_time::Duration;
