//! Node configuration
//!
//! Plain structs with firmware defaults. Everything is fixed at build or
//! boot time; nothing is persisted.

use embassy_time::Duration;

use crate::protocol::{SCAN_FIRST_ADDRESS, SCAN_LAST_ADDRESS};
use crate::state::NodeState;

/// NEC address of the bundled remote
pub const DEFAULT_IR_ADDRESS: u16 = 0x00ef;

/// Background ticks a repeat frame stays valid after the last frame
pub const DEFAULT_REPEAT_TIMEOUT_TICKS: u8 = 4;

/// Capture timer overflow period (16-bit counter at 1 MHz)
pub const CAPTURE_OVERFLOW_PERIOD: Duration = Duration::from_micros(65_536);

/// Duty counts below this disconnect the channel
pub const DEFAULT_OFF_THRESHOLD: u16 = 2;

/// Time given to responders to boot before discovery
pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_millis(100);

/// Infrared receiver settings
#[derive(Debug, Clone, Copy)]
pub struct IrConfig {
    /// Frames for other addresses are decoded but ignored
    pub accepted_address: u16,
    /// Repeats are honored only while fewer than this many overflow ticks
    /// have passed since the last frame or honored repeat
    pub repeat_timeout_ticks: u8,
}

impl IrConfig {
    /// How long after a frame a repeat code is still honored
    pub fn repeat_timeout(&self) -> Duration {
        CAPTURE_OVERFLOW_PERIOD * u32::from(self.repeat_timeout_ticks)
    }
}

impl Default for IrConfig {
    fn default() -> Self {
        Self {
            accepted_address: DEFAULT_IR_ADDRESS,
            repeat_timeout_ticks: DEFAULT_REPEAT_TIMEOUT_TICKS,
        }
    }
}

/// PWM output settings
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub off_threshold: u16,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            off_threshold: DEFAULT_OFF_THRESHOLD,
        }
    }
}

/// Bus coordinator settings
#[derive(Debug, Clone, Copy)]
pub struct BusConfig {
    pub startup_delay: Duration,
    pub scan_first: u8,
    pub scan_last: u8,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            startup_delay: DEFAULT_STARTUP_DELAY,
            scan_first: SCAN_FIRST_ADDRESS,
            scan_last: SCAN_LAST_ADDRESS,
        }
    }
}

/// Light node settings
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeConfig {
    /// State applied at boot
    pub initial: NodeState,
    pub ir: IrConfig,
}
