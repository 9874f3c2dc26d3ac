//! Main-loop side of the NEC receiver

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::capture::{PulseCapture, RawPulseBuffer};
use super::timing::{
    BIT_PAUSE, BIT_PULSE, BIT_SPLIT_US, FRAME_SPANS, LEAD_PAUSE, REPEAT_SPLIT_US, START_PULSE,
    Span,
};

/// Address and command carried by one NEC frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFrame {
    pub address: u16,
    pub command: u8,
    pub command_complement: u8,
}

impl DecodedFrame {
    /// Build a well-formed frame
    pub const fn new(address: u16, command: u8) -> Self {
        Self {
            address,
            command,
            command_complement: !command,
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.command == !self.command_complement
    }
}

/// Output of the receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrEvent {
    /// A freshly decoded frame
    Press(DecodedFrame),
    /// The remote asked to replay the last frame
    Repeat(DecodedFrame),
}

impl IrEvent {
    pub const fn frame(&self) -> DecodedFrame {
        match self {
            Self::Press(frame) | Self::Repeat(frame) => *frame,
        }
    }

    pub const fn is_repeat(&self) -> bool {
        matches!(self, Self::Repeat(_))
    }
}

/// Decode a full raw buffer
///
/// Bits are packed LSB first into four bytes. The address is bytes 0 and 1
/// (byte 0 high), the command is byte 2 and must be the complement of byte 3.
pub fn decode_frame(buffer: &RawPulseBuffer) -> Option<DecodedFrame> {
    if !START_PULSE.contains(buffer[0]) {
        return None;
    }
    if !LEAD_PAUSE.contains(buffer[1]) || buffer[1] < REPEAT_SPLIT_US {
        return None;
    }

    let mut bytes = [0u8; 4];
    let mut bit = 0;
    for (position, &length) in buffer.iter().enumerate().take(FRAME_SPANS).skip(2) {
        match Span::at(position) {
            Span::Pulse => {
                if !BIT_PULSE.contains(length) {
                    return None;
                }
            }
            Span::Pause => {
                if !BIT_PAUSE.contains(length) {
                    return None;
                }
                if length > BIT_SPLIT_US {
                    bytes[bit / 8] |= 1 << (bit % 8);
                }
                bit += 1;
            }
        }
    }

    let frame = DecodedFrame {
        address: u16::from_be_bytes([bytes[0], bytes[1]]),
        command: bytes[2],
        command_complement: bytes[3],
    };
    frame.is_valid().then_some(frame)
}

/// Turns captured buffers and repeat signals into [`IrEvent`]s
#[derive(Debug, Default)]
pub struct NecDecoder {
    last: Option<DecodedFrame>,
}

impl NecDecoder {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Last frame that passed the checksum
    pub const fn last_frame(&self) -> Option<DecodedFrame> {
        self.last
    }

    /// Check the capture for a finished frame, then for a repeat
    ///
    /// Call once per main-loop iteration. A repeat before any valid frame
    /// yields nothing.
    pub fn poll(&mut self, capture: &PulseCapture) -> Option<IrEvent> {
        if let Some(buffer) = capture.take_frame() {
            if let Some(frame) = decode_frame(&buffer) {
                self.last = Some(frame);
                return Some(IrEvent::Press(frame));
            }
            #[cfg(feature = "esp32-log")]
            println!("[NecDecoder] dropped malformed frame");
        }

        if capture.take_repeat() {
            #[cfg(feature = "esp32-log")]
            println!("[NecDecoder] repeat {:?}", self.last);
            return self.last.map(IrEvent::Repeat);
        }

        None
    }
}
