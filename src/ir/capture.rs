//! Interrupt side of the NEC receiver
//!
//! The edge-capture interrupt feeds span lengths into [`PulseCapture`],
//! which fills a raw buffer keyed by position:
//!
//! - position 0 accepts only a start pulse; anything else is ignored
//! - position 1 takes the lead pause: a short one announces a repeat, a long
//!   one continues into a full frame
//! - positions 2..66 take alternating bit pulses and pauses
//!
//! Any span outside its window drops the partial frame. A completed frame
//! blocks further filling until the main loop takes it.

use core::cell::RefCell;

use critical_section::Mutex;

use super::timing::{
    BIT_PAUSE, BIT_PULSE, FRAME_SPANS, LEAD_PAUSE, REPEAT_SPLIT_US, START_PULSE, Span,
};
use crate::config::IrConfig;

/// What the capture interrupt must do with the hardware counter after an edge
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureAction {
    /// Leave the counter running
    Continue,
    /// Clear the counter to zero
    RestartTimer,
}

/// Span lengths of one frame in microseconds
pub type RawPulseBuffer = [u16; FRAME_SPANS];

#[derive(Debug)]
struct CaptureState {
    buffer: RawPulseBuffer,
    position: usize,
    frame_ready: bool,
    repeat_pending: bool,
    /// Overflow ticks since the last frame start or honored repeat
    repeat_age: u8,
    baseline: u16,
}

impl CaptureState {
    fn feed(&mut self, span: Span, length: u16, repeat_timeout_ticks: u8) {
        match self.position {
            0 => {
                if span != Span::Pulse || !START_PULSE.contains(length) {
                    return;
                }
            }
            1 => {
                if span != Span::Pause || !LEAD_PAUSE.contains(length) {
                    self.position = 0;
                    return;
                }
                if length < REPEAT_SPLIT_US {
                    if self.repeat_age < repeat_timeout_ticks {
                        self.repeat_pending = true;
                        self.repeat_age = 0;
                    }
                    self.position = 0;
                    return;
                }
                self.repeat_age = 0;
            }
            position => {
                let window = match Span::at(position) {
                    Span::Pulse => BIT_PULSE,
                    Span::Pause => BIT_PAUSE,
                };
                if span != Span::at(position) || !window.contains(length) {
                    self.position = 0;
                    return;
                }
            }
        }

        if self.frame_ready {
            return;
        }

        self.buffer[self.position] = length;
        self.position += 1;
        if self.position == FRAME_SPANS {
            self.position = 0;
            self.frame_ready = true;
        }
    }
}

/// Edge-capture front end shared between the capture interrupt and the main
/// loop
pub struct PulseCapture {
    repeat_timeout_ticks: u8,
    state: Mutex<RefCell<CaptureState>>,
}

impl PulseCapture {
    pub const fn new(repeat_timeout_ticks: u8) -> Self {
        Self {
            repeat_timeout_ticks,
            state: Mutex::new(RefCell::new(CaptureState {
                buffer: [0; FRAME_SPANS],
                position: 0,
                frame_ready: false,
                repeat_pending: false,
                repeat_age: repeat_timeout_ticks,
                baseline: 0,
            })),
        }
    }

    pub const fn from_config(config: &IrConfig) -> Self {
        Self::new(config.repeat_timeout_ticks)
    }

    /// Capture interrupt entry point
    ///
    /// `timestamp` is the 16-bit capture counter (1 µs per count); `span` is
    /// the kind of span that ended at this edge. The counter must be cleared
    /// whenever [`CaptureAction::RestartTimer`] is returned. That happens on
    /// every edge up to the end of the lead pause, which keeps the overflow
    /// interrupt locked to the frame so it only fires once the data bits have
    /// finished or stalled.
    pub fn on_capture(&self, timestamp: u16, span: Span) -> CaptureAction {
        critical_section::with(|cs| {
            let mut state = self.state.borrow(cs).borrow_mut();
            let length = timestamp.wrapping_sub(state.baseline);
            let lead_in = state.position <= 1;
            state.feed(span, length, self.repeat_timeout_ticks);
            if lead_in {
                state.baseline = 0;
                CaptureAction::RestartTimer
            } else {
                state.baseline = timestamp;
                CaptureAction::Continue
            }
        })
    }

    /// Feed a span whose length is already known
    pub fn on_span(&self, span: Span, length: u16) {
        critical_section::with(|cs| {
            let mut state = self.state.borrow(cs).borrow_mut();
            state.feed(span, length, self.repeat_timeout_ticks);
        });
    }

    /// Capture counter overflow entry point (~65 ms)
    ///
    /// Drops any partial frame, restarts the timestamp baseline and ages the
    /// repeat window. The counter has just wrapped to zero, so the next edge
    /// is measured from the wrap; that edge always lands at position 0 and
    /// restarts the counter.
    pub fn on_overflow(&self) {
        critical_section::with(|cs| {
            let mut state = self.state.borrow(cs).borrow_mut();
            state.baseline = 0;
            state.position = 0;
            if state.repeat_age < self.repeat_timeout_ticks {
                state.repeat_age += 1;
            }
        });
    }

    /// Take a completed frame, releasing the buffer for the next one
    pub fn take_frame(&self) -> Option<RawPulseBuffer> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow(cs).borrow_mut();
            if !state.frame_ready {
                return None;
            }
            state.frame_ready = false;
            Some(state.buffer)
        })
    }

    /// Take a pending repeat signal
    pub fn take_repeat(&self) -> bool {
        critical_section::with(|cs| {
            let mut state = self.state.borrow(cs).borrow_mut();
            core::mem::replace(&mut state.repeat_pending, false)
        })
    }

    /// Current fill position, 0 when idle
    pub fn position(&self) -> usize {
        critical_section::with(|cs| self.state.borrow(cs).borrow().position)
    }

    pub fn is_frame_ready(&self) -> bool {
        critical_section::with(|cs| self.state.borrow(cs).borrow().frame_ready)
    }
}

impl Default for PulseCapture {
    fn default() -> Self {
        Self::from_config(&IrConfig::default())
    }
}
