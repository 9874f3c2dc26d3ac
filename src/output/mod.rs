//! Output stage
//!
//! Turns linear colors into duty counts and hands them to the PWM generator
//! without tearing: new values land in a pending buffer and are only
//! committed from the generator's period-rollover interrupt.

mod duty;
mod gamma;

use core::cell::{Cell, RefCell};

use critical_section::Mutex;

pub use duty::{CHANNELS, DutyBuffer, DutyCycles, PwmFrame};
pub use gamma::{GAMMA_TABLE_SIZE, GammaTable};

use crate::color::Rgb10;
use crate::config::OutputConfig;

/// Abstract PWM generator
///
/// Implement this trait for the timer peripheral driving the light head.
pub trait PwmOutput {
    /// Load duty counts and line enables for the period that just started
    fn commit(&mut self, frame: &PwmFrame);

    /// Stop the generator and disconnect every channel
    fn halt(&mut self);

    /// Restart the generator, keeping the loaded duty counts
    fn resume(&mut self);
}

struct Generator<P> {
    buffer: DutyBuffer,
    pwm: P,
    running: bool,
}

/// Double-buffered PWM front end shared by the main loop and the rollover
/// interrupt
pub struct OutputStage<P: PwmOutput> {
    gamma: GammaTable,
    off_threshold: u16,
    generator: Mutex<RefCell<Generator<P>>>,
    pending_ticks: Mutex<Cell<u16>>,
}

impl<P: PwmOutput> OutputStage<P> {
    /// Wrap an already configured, running generator
    pub fn new(pwm: P, gamma: GammaTable, config: &OutputConfig) -> Self {
        Self {
            gamma,
            off_threshold: config.off_threshold,
            generator: Mutex::new(RefCell::new(Generator {
                buffer: DutyBuffer::new(),
                pwm,
                running: true,
            })),
            pending_ticks: Mutex::new(Cell::new(0)),
        }
    }

    /// Gamma-corrected duty counts for a color
    pub fn duty_for(&self, color: Rgb10) -> DutyCycles {
        [
            self.gamma.map(color.r),
            self.gamma.map(color.g),
            self.gamma.map(color.b),
        ]
    }

    /// Stage a color for the next period
    ///
    /// Callable from any context; takes effect at the next rollover.
    pub fn set(&self, color: Rgb10) {
        let duty = self.duty_for(color);
        critical_section::with(|cs| {
            self.generator.borrow(cs).borrow_mut().buffer.write(duty);
        });
    }

    /// Period-rollover handler
    ///
    /// Commits the pending duty counts, disables near-zero channels and
    /// counts one animation tick. Does nothing while halted.
    pub fn on_period_boundary(&self) {
        critical_section::with(|cs| {
            let mut generator = self.generator.borrow(cs).borrow_mut();
            if !generator.running {
                return;
            }
            let duty = generator.buffer.swap();
            let frame = PwmFrame::from_duty(duty, self.off_threshold);
            generator.pwm.commit(&frame);

            let ticks = self.pending_ticks.borrow(cs);
            ticks.set(ticks.get().saturating_add(1));
        });
    }

    /// Read and clear the number of rollovers since the last call
    pub fn take_pending_ticks(&self) -> u16 {
        critical_section::with(|cs| self.pending_ticks.borrow(cs).replace(0))
    }

    /// Stop the generator and force every channel off
    pub fn halt(&self) {
        critical_section::with(|cs| {
            let mut generator = self.generator.borrow(cs).borrow_mut();
            if !generator.running {
                return;
            }
            generator.running = false;
            generator.pwm.halt();
        });
    }

    /// Restart the generator; stored duty counts are left untouched
    pub fn resume(&self) {
        critical_section::with(|cs| {
            let mut generator = self.generator.borrow(cs).borrow_mut();
            if generator.running {
                return;
            }
            generator.running = true;
            generator.pwm.resume();
        });
    }

    pub fn is_running(&self) -> bool {
        critical_section::with(|cs| self.generator.borrow(cs).borrow().running)
    }

    pub fn pending_duty(&self) -> DutyCycles {
        critical_section::with(|cs| self.generator.borrow(cs).borrow().buffer.pending())
    }

    pub fn committed_duty(&self) -> DutyCycles {
        critical_section::with(|cs| self.generator.borrow(cs).borrow().buffer.committed())
    }

    /// Run `f` against the generator inside a critical section
    pub fn with_pwm<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        critical_section::with(|cs| f(&mut self.generator.borrow(cs).borrow_mut().pwm))
    }
}
