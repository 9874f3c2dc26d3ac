//! NEC infrared receiver
//!
//! Split in two halves: [`PulseCapture`] runs in the edge-capture and
//! overflow interrupts, [`NecDecoder`] runs in the main loop and turns
//! captured buffers into [`IrEvent`]s.

mod capture;
mod decoder;
pub mod keymap;
pub mod timing;

pub use capture::{CaptureAction, PulseCapture, RawPulseBuffer};
pub use decoder::{DecodedFrame, IrEvent, NecDecoder, decode_frame};
pub use timing::Span;
