//! NEC pulse-distance timing
//!
//! Every nominal length is a whole multiple of the 562.5 µs base unit. A
//! span is accepted within ±50 % of its nominal length.

/// Base unit in nanoseconds
pub const BASE_UNIT_NS: u32 = 562_500;

#[allow(clippy::cast_possible_truncation)]
const fn nominal(units: u32) -> u16 {
    (units * BASE_UNIT_NS / 1_000) as u16
}

pub const START_PULSE_US: u16 = nominal(16);
pub const START_PAUSE_US: u16 = nominal(8);
pub const REPEAT_PAUSE_US: u16 = nominal(4);
pub const BIT_PULSE_US: u16 = nominal(1);
pub const BIT_0_PAUSE_US: u16 = nominal(1);
pub const BIT_1_PAUSE_US: u16 = nominal(3);

/// Inclusive range of accepted span lengths in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub min: u16,
    pub max: u16,
}

impl Window {
    /// Nominal length ±50 %
    pub const fn around(nominal: u16) -> Self {
        let margin = nominal / 2;
        Self {
            min: nominal - margin,
            max: nominal + margin,
        }
    }

    /// From the lower bound of `low` to the upper bound of `high`
    pub const fn spanning(low: Self, high: Self) -> Self {
        Self {
            min: low.min,
            max: high.max,
        }
    }

    #[inline]
    pub const fn contains(self, length: u16) -> bool {
        length >= self.min && length <= self.max
    }
}

pub const START_PULSE: Window = Window::around(START_PULSE_US);

/// Pause after the start pulse; covers both repeat and full frames
pub const LEAD_PAUSE: Window =
    Window::spanning(Window::around(REPEAT_PAUSE_US), Window::around(START_PAUSE_US));

pub const BIT_PULSE: Window = Window::around(BIT_PULSE_US);

pub const BIT_PAUSE: Window =
    Window::spanning(Window::around(BIT_0_PAUSE_US), Window::around(BIT_1_PAUSE_US));

/// Lead pauses shorter than this announce a repeat
pub const REPEAT_SPLIT_US: u16 = (START_PAUSE_US + REPEAT_PAUSE_US) / 2;

/// Bit pauses longer than this encode a one
pub const BIT_SPLIT_US: u16 = (BIT_0_PAUSE_US + BIT_1_PAUSE_US) / 2;

/// Start pulse, lead pause, then a pulse and a pause per data bit
pub const FRAME_SPANS: usize = 2 + 2 * FRAME_BITS;

/// Data bits per frame
pub const FRAME_BITS: usize = 32;

/// Kind of span that just ended at a capture edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// Carrier burst
    Pulse,
    /// Gap between bursts
    Pause,
}

impl Span {
    /// Spans alternate, starting with the start pulse at position 0
    pub const fn at(position: usize) -> Self {
        if position % 2 == 0 { Self::Pulse } else { Self::Pause }
    }
}
