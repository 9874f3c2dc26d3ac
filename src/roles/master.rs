#[cfg(feature = "esp32-log")]
use esp_println::println;

use embedded_hal::i2c::I2c;

use crate::bus::{Coordinator, CoordinatorError, SlaveRegistry};
use crate::config::{BusConfig, NodeConfig};
use crate::ir::{NecDecoder, PulseCapture};
use crate::node::{DispatchEffects, LightNode};
use crate::output::{OutputStage, PwmOutput};
use crate::protocol::{MasterBroadcast, NodeCommand};

/// What one main-loop iteration of the master did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MasterReport {
    /// Commands received from responders
    pub remote_commands: usize,
    /// Command decoded from the local remote
    pub local_command: Option<NodeCommand>,
    /// Broadcast sent because the mode changed
    pub broadcast: Option<MasterBroadcast>,
    /// Animation ticks serviced
    pub ticks: u16,
}

/// Light node that also coordinates the bus
pub struct MasterNode<'a, P: PwmOutput, I2C> {
    node: LightNode<'a, P>,
    coordinator: Coordinator<I2C>,
    capture: &'a PulseCapture,
    decoder: NecDecoder,
}

impl<'a, P: PwmOutput, I2C: I2c> MasterNode<'a, P, I2C> {
    pub fn new(
        output: &'a OutputStage<P>,
        capture: &'a PulseCapture,
        i2c: I2C,
        config: &NodeConfig,
        bus: &BusConfig,
    ) -> Self {
        Self {
            node: LightNode::new(output, config),
            coordinator: Coordinator::new(i2c, bus),
            capture,
            decoder: NecDecoder::new(),
        }
    }

    pub const fn node(&self) -> &LightNode<'a, P> {
        &self.node
    }

    pub const fn registry(&self) -> &SlaveRegistry {
        self.coordinator.registry()
    }

    /// Discover responders and announce the initial mode
    pub fn start(&mut self) -> Result<usize, CoordinatorError<I2C::Error>> {
        let found = self.coordinator.discover()?.len();
        self.coordinator
            .broadcast(MasterBroadcast::for_animated(self.node.state().is_animated()));
        Ok(found)
    }

    /// One main-loop iteration
    ///
    /// Applies a local remote press, polls every responder and dispatches
    /// what they queued, announces a mode change if the net mode differs,
    /// then services the animation.
    pub fn run_once(&mut self) -> Result<MasterReport, CoordinatorError<I2C::Error>> {
        let mut report = MasterReport::default();
        let mode_before = self.node.state().mode;
        let mut effects = DispatchEffects::default();

        if let Some((command, local)) = self
            .decoder
            .poll(self.capture)
            .and_then(|event| self.node.handle_ir_event(event))
        {
            effects.merge(local);
            report.local_command = Some(command);
        }

        let node = &mut self.node;
        let polled = self.coordinator.poll(|byte| effects.merge(node.dispatch(byte)));

        // a mode left and re-entered within one pass is not announced
        effects.mode_changed = effects.mode_changed.filter(|&mode| mode != mode_before);
        if let Some(message) = effects.broadcast() {
            self.coordinator.broadcast(message);
            report.broadcast = Some(message);
        }
        report.ticks = self.node.service();

        report.remote_commands = polled.inspect_err(|_err| {
            #[cfg(feature = "esp32-log")]
            println!("[MasterNode] poll failed: {}", _err);
        })?;
        Ok(report)
    }
}
