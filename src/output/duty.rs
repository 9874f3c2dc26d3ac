/// Number of color channels driven by the generator
pub const CHANNELS: usize = 3;

/// Duty counts for red, green and blue
pub type DutyCycles = [u16; CHANNELS];

/// Pending/committed duty pair
///
/// The pending copy may be rewritten at any time. The committed copy is what
/// the generator runs and is only replaced by [`DutyBuffer::swap`] at a
/// period boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DutyBuffer {
    pending: DutyCycles,
    committed: DutyCycles,
}

impl DutyBuffer {
    pub const fn new() -> Self {
        Self {
            pending: [0; CHANNELS],
            committed: [0; CHANNELS],
        }
    }

    pub fn write(&mut self, duty: DutyCycles) {
        self.pending = duty;
    }

    pub const fn pending(&self) -> DutyCycles {
        self.pending
    }

    pub const fn committed(&self) -> DutyCycles {
        self.committed
    }

    /// Promote the pending copy; period boundary only
    pub(crate) fn swap(&mut self) -> DutyCycles {
        self.committed = self.pending;
        self.committed
    }
}

/// What the generator runs for one period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PwmFrame {
    pub duty: DutyCycles,
    /// Per-channel output line enable
    pub enabled: [bool; CHANNELS],
}

impl PwmFrame {
    /// Disable every channel whose duty is below `threshold`
    pub fn from_duty(duty: DutyCycles, threshold: u16) -> Self {
        Self {
            duty,
            enabled: duty.map(|value| value >= threshold),
        }
    }
}
