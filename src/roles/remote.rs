#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::bus::Responder;
use crate::config::IrConfig;
use crate::ir::{NecDecoder, PulseCapture, keymap};
use crate::protocol::NodeCommand;

/// Remote-control receiver with no light of its own
///
/// Decoded presses are queued for the coordinator to collect. Up/down keys
/// follow the mode last broadcast by the master.
pub struct RemoteNode<'a, const SIZE: usize> {
    capture: &'a PulseCapture,
    responder: &'a Responder<'a, SIZE>,
    decoder: NecDecoder,
    accepted_address: u16,
}

impl<'a, const SIZE: usize> RemoteNode<'a, SIZE> {
    pub fn new(
        capture: &'a PulseCapture,
        responder: &'a Responder<'a, SIZE>,
        config: &IrConfig,
    ) -> Self {
        Self {
            capture,
            responder,
            decoder: NecDecoder::new(),
            accepted_address: config.accepted_address,
        }
    }

    /// One main-loop iteration; returns the command queued, if any
    pub fn run_once(&mut self) -> Option<NodeCommand> {
        let event = self.decoder.poll(self.capture)?;
        let command = keymap::command_for(
            &event.frame(),
            self.accepted_address,
            self.responder.master_animated(),
        )?;

        #[cfg(feature = "esp32-log")]
        println!("[RemoteNode] queue {:?}", command);

        self.responder.queue().enqueue(command.to_byte());
        Some(command)
    }
}
