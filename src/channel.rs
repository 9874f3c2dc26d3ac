//! Interrupt-safe bounded ring for `no_std` environments.
//!
//! A single-producer/single-consumer ring built on `critical-section` and
//! `heapless::spsc::Queue`. The producer and consumer may run in different
//! interrupt priority contexts, so every index update happens inside a
//! critical section.
//!
//! The ring keeps one slot empty to tell "full" from "empty", so a
//! `Channel<T, 16>` holds at most 15 items.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::spsc::Queue;

use crate::protocol::COMMAND_IDLE;

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

impl<T> core::fmt::Display for TrySendError<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "channel is full")
    }
}

impl core::fmt::Display for TryReceiveError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "channel is empty")
    }
}

/// A bounded, interrupt-safe ring.
///
/// `SIZE` must be a power of two; one slot is reserved, so the usable
/// capacity is `SIZE - 1`.
pub struct Channel<T, const SIZE: usize> {
    inner: Mutex<RefCell<Queue<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    const SIZE_IS_POWER_OF_TWO: () = assert!(SIZE.is_power_of_two());

    /// Create a new empty channel.
    pub const fn new() -> Self {
        let () = Self::SIZE_IS_POWER_OF_TWO;
        Self {
            inner: Mutex::new(RefCell::new(Queue::new())),
        }
    }

    /// Get a sender handle for this channel.
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Get a receiver handle for this channel.
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Maximum number of items the channel can hold at once.
    pub const fn capacity(&self) -> usize {
        SIZE - 1
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Try to send a value into the channel.
    ///
    /// Returns `Err(TrySendError(value))` if the channel is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.enqueue(value).map_err(TrySendError)
        })
    }

    /// Try to receive a value from the channel.
    ///
    /// Returns `Err(TryReceiveError)` if the channel is empty.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.dequeue().ok_or(TryReceiveError)
        })
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`Channel`].
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    /// Try to send a value into the channel.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

/// A receiver handle for a [`Channel`].
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    /// Try to receive a value from the channel.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }
}

/// Number of slots in the command ring.
pub const COMMAND_QUEUE_SIZE: usize = 16;

/// Command bytes waiting to be picked up by the bus coordinator.
pub type CommandQueue = Channel<u8, COMMAND_QUEUE_SIZE>;

impl<const SIZE: usize> Channel<u8, SIZE> {
    /// Queue a command byte, dropping it if the ring is full.
    ///
    /// Producers never stall; the oldest queued commands win.
    pub fn enqueue(&self, command: u8) {
        if self.try_send(command).is_err() {
            #[cfg(feature = "esp32-log")]
            esp_println::println!("[CommandQueue] full, dropping {:#04x}", command);
        }
    }

    /// Take the oldest command byte, or [`COMMAND_IDLE`] when empty.
    pub fn dequeue(&self) -> u8 {
        self.try_receive().unwrap_or(COMMAND_IDLE)
    }
}
