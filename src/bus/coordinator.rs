//! Master side of the node bus
//!
//! Discovers responders once at startup, then polls each of them every
//! main-loop iteration for a queued command byte. A negative acknowledgment
//! is a normal "absent" or "not ready" answer, never an error.
//!
//! Transactions block until the bus implementation returns; no timeout is
//! layered on top.

use embassy_time::{Duration, block_for};
use embedded_hal::i2c::{ErrorKind, I2c};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::registry::SlaveRegistry;
use crate::config::BusConfig;
use crate::protocol::{COMMAND_IDLE, GENERAL_CALL_ADDRESS, MasterBroadcast};

/// Bus failure other than a negative acknowledgment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorError<E> {
    Bus(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for CoordinatorError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoordinatorError::Bus(err) => write!(f, "bus transaction failed: {:?}", err),
        }
    }
}

/// Bus master for a set of light and remote nodes
pub struct Coordinator<I2C> {
    i2c: I2C,
    config: BusConfig,
    registry: SlaveRegistry,
}

impl<I2C: I2c> Coordinator<I2C> {
    pub fn new(i2c: I2C, config: &BusConfig) -> Self {
        Self {
            i2c,
            config: *config,
            registry: SlaveRegistry::new(),
        }
    }

    pub const fn registry(&self) -> &SlaveRegistry {
        &self.registry
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Wait for responders to boot, then scan the address range
    ///
    /// Addresses are probed in ascending order; scanning stops once the
    /// registry is full. Run once at startup.
    pub fn discover(&mut self) -> Result<&SlaveRegistry, CoordinatorError<I2C::Error>> {
        if self.config.startup_delay > Duration::from_ticks(0) {
            block_for(self.config.startup_delay);
        }

        self.registry.clear();
        for address in self.config.scan_first..=self.config.scan_last {
            if self.registry.is_full() {
                break;
            }
            if self.probe(address)? && self.registry.push(address).is_err() {
                break;
            }
        }

        #[cfg(feature = "esp32-log")]
        println!("[Coordinator] discovered {:?}", self.registry.as_slice());

        Ok(&self.registry)
    }

    /// Address-only transaction; `Ok(true)` if something acknowledged
    pub fn probe(&mut self, address: u8) -> Result<bool, CoordinatorError<I2C::Error>> {
        match self.i2c.write(address, &[]) {
            Ok(()) => Ok(true),
            Err(err) if is_nack(&err) => Ok(false),
            Err(err) => Err(CoordinatorError::Bus(err)),
        }
    }

    /// Read one byte from every registered responder
    ///
    /// Each command byte other than idle is handed to `deliver` in discovery
    /// order. Responders that do not acknowledge are skipped. Returns the
    /// number of commands delivered.
    pub fn poll(
        &mut self,
        mut deliver: impl FnMut(u8),
    ) -> Result<usize, CoordinatorError<I2C::Error>> {
        let mut delivered = 0;
        for &address in self.registry.as_slice() {
            let mut byte = [COMMAND_IDLE];
            match self.i2c.read(address, &mut byte) {
                Ok(()) => {}
                Err(err) if is_nack(&err) => continue,
                Err(err) => return Err(CoordinatorError::Bus(err)),
            }
            if byte[0] != COMMAND_IDLE {
                deliver(byte[0]);
                delivered += 1;
            }
        }
        Ok(delivered)
    }

    /// Fire-and-forget write to the general call address
    pub fn broadcast(&mut self, message: MasterBroadcast) {
        #[cfg(feature = "esp32-log")]
        println!("[Coordinator] broadcast {:?}", message);

        let _ = self.i2c.write(GENERAL_CALL_ADDRESS, &[message.to_byte()]);
    }
}

fn is_nack<E: embedded_hal::i2c::Error>(err: &E) -> bool {
    matches!(err.kind(), ErrorKind::NoAcknowledge(_))
}
