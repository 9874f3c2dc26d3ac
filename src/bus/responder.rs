//! Node side of the bus
//!
//! Called from the bus interrupt: reads drain the local command queue, writes
//! carry the coordinator's state broadcasts.

use core::cell::Cell;

use critical_section::Mutex;

use crate::channel::Channel;
use crate::protocol::MasterBroadcast;

pub struct Responder<'a, const SIZE: usize> {
    queue: &'a Channel<u8, SIZE>,
    master_animated: Mutex<Cell<bool>>,
}

impl<'a, const SIZE: usize> Responder<'a, SIZE> {
    pub const fn new(queue: &'a Channel<u8, SIZE>) -> Self {
        Self {
            queue,
            master_animated: Mutex::new(Cell::new(false)),
        }
    }

    /// Coordinator reads one byte: the next queued command or idle
    pub fn on_read_request(&self) -> u8 {
        self.queue.dequeue()
    }

    /// Coordinator wrote a byte, individually or by general call
    pub fn on_write(&self, byte: u8) {
        let Some(message) = MasterBroadcast::from_byte(byte) else {
            return;
        };
        critical_section::with(|cs| {
            self.master_animated
                .borrow(cs)
                .set(message == MasterBroadcast::AnimationOn);
        });
    }

    /// Whether the coordinator last reported animated mode
    pub fn master_animated(&self) -> bool {
        critical_section::with(|cs| self.master_animated.borrow(cs).get())
    }

    pub const fn queue(&self) -> &'a Channel<u8, SIZE> {
        self.queue
    }
}
