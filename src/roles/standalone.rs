use crate::config::NodeConfig;
use crate::ir::{NecDecoder, PulseCapture};
use crate::node::LightNode;
use crate::output::{OutputStage, PwmOutput};
use crate::protocol::NodeCommand;

/// Single light driven directly by a remote, no bus
pub struct StandaloneNode<'a, P: PwmOutput> {
    node: LightNode<'a, P>,
    capture: &'a PulseCapture,
    decoder: NecDecoder,
}

impl<'a, P: PwmOutput> StandaloneNode<'a, P> {
    pub fn new(
        output: &'a OutputStage<P>,
        capture: &'a PulseCapture,
        config: &NodeConfig,
    ) -> Self {
        Self {
            node: LightNode::new(output, config),
            capture,
            decoder: NecDecoder::new(),
        }
    }

    pub const fn node(&self) -> &LightNode<'a, P> {
        &self.node
    }

    /// One main-loop iteration; returns the command applied, if any
    pub fn run_once(&mut self) -> Option<NodeCommand> {
        let applied = self
            .decoder
            .poll(self.capture)
            .and_then(|event| self.node.handle_ir_event(event));
        self.node.service();
        applied.map(|(command, _)| command)
    }
}
