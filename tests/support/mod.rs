#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use myrtio_light_node::config::CAPTURE_OVERFLOW_PERIOD;
use myrtio_light_node::ir::{CaptureAction, PulseCapture, Span};
use myrtio_light_node::ir::timing::{
    BIT_0_PAUSE_US, BIT_1_PAUSE_US, BIT_PULSE_US, REPEAT_PAUSE_US, START_PAUSE_US, START_PULSE_US,
};
use myrtio_light_node::output::{GammaTable, OutputStage, PwmFrame, PwmOutput};
use myrtio_light_node::protocol::GENERAL_CALL_ADDRESS;
use myrtio_light_node::{BusConfig, Duration, OutputConfig};

/// PWM generator that records everything it is asked to do
#[derive(Debug, Default)]
pub struct FakePwm {
    pub frames: Vec<PwmFrame>,
    pub halts: usize,
    pub resumes: usize,
    pub halted: bool,
}

impl PwmOutput for FakePwm {
    fn commit(&mut self, frame: &PwmFrame) {
        self.frames.push(*frame);
    }

    fn halt(&mut self) {
        self.halts += 1;
        self.halted = true;
    }

    fn resume(&mut self) {
        self.resumes += 1;
        self.halted = false;
    }
}

/// Output stage with an identity gamma curve so duty equals color
pub fn linear_stage() -> OutputStage<FakePwm> {
    OutputStage::new(
        FakePwm::default(),
        GammaTable::linear(),
        &OutputConfig::default(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeError {
    Nack,
    Arbitration,
}

impl embedded_hal::i2c::Error for FakeError {
    fn kind(&self) -> ErrorKind {
        match self {
            FakeError::Nack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            FakeError::Arbitration => ErrorKind::ArbitrationLoss,
        }
    }
}

/// Simulated bus with responders holding queued command bytes
#[derive(Debug, Default)]
pub struct FakeBus {
    pub responders: BTreeMap<u8, VecDeque<u8>>,
    /// Responders that acknowledge probes but refuse reads
    pub busy: BTreeSet<u8>,
    /// Address whose transactions fail with a non-NACK error
    pub broken: Option<u8>,
    /// Non-empty writes as `(address, bytes)`
    pub writes: Vec<(u8, Vec<u8>)>,
}

impl FakeBus {
    pub fn with_responders(addresses: &[u8]) -> Self {
        let mut bus = Self::default();
        for &address in addresses {
            bus.responders.insert(address, VecDeque::new());
        }
        bus
    }

    pub fn queue(&mut self, address: u8, bytes: &[u8]) {
        self.responders
            .entry(address)
            .or_default()
            .extend(bytes.iter().copied());
    }

    pub fn broadcasts(&self) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(address, _)| *address == GENERAL_CALL_ADDRESS)
            .flat_map(|(_, bytes)| bytes.iter().copied())
            .collect()
    }
}

impl ErrorType for FakeBus {
    type Error = FakeError;
}

impl I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.broken == Some(address) {
            return Err(FakeError::Arbitration);
        }
        if address == GENERAL_CALL_ADDRESS {
            for operation in operations.iter() {
                if let Operation::Write(bytes) = operation {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            return Ok(());
        }

        let busy = self.busy.contains(&address);
        let Some(queue) = self.responders.get_mut(&address) else {
            return Err(FakeError::Nack);
        };
        for operation in operations.iter_mut() {
            match operation {
                Operation::Read(buffer) => {
                    if busy {
                        return Err(FakeError::Nack);
                    }
                    for byte in buffer.iter_mut() {
                        *byte = queue.pop_front().unwrap_or(0);
                    }
                }
                Operation::Write(bytes) => {
                    if !bytes.is_empty() {
                        self.writes.push((address, bytes.to_vec()));
                    }
                }
            }
        }
        Ok(())
    }
}

pub fn instant_bus_config() -> BusConfig {
    BusConfig {
        startup_delay: Duration::from_millis(0),
        ..BusConfig::default()
    }
}

/// Nominal spans for a frame carrying four raw bytes
pub fn nec_spans(bytes: [u8; 4]) -> Vec<(Span, u16)> {
    let mut spans = vec![(Span::Pulse, START_PULSE_US), (Span::Pause, START_PAUSE_US)];
    for byte in bytes {
        for bit in 0..8 {
            let pause = if (byte >> bit) & 1 == 1 {
                BIT_1_PAUSE_US
            } else {
                BIT_0_PAUSE_US
            };
            spans.push((Span::Pulse, BIT_PULSE_US));
            spans.push((Span::Pause, pause));
        }
    }
    spans
}

/// Nominal spans for a well-formed frame
pub fn frame_spans(address: u16, command: u8) -> Vec<(Span, u16)> {
    let [high, low] = address.to_be_bytes();
    nec_spans([high, low, command, !command])
}

pub fn repeat_spans() -> Vec<(Span, u16)> {
    vec![(Span::Pulse, START_PULSE_US), (Span::Pause, REPEAT_PAUSE_US)]
}

pub fn feed(capture: &PulseCapture, spans: &[(Span, u16)]) {
    for &(span, length) in spans {
        capture.on_span(span, length);
    }
}

/// 1 MHz capture counter as the board runs it: overflow interrupt on every
/// wrap, cleared whenever the capture asks for it
pub struct CaptureTimer<'a> {
    capture: &'a PulseCapture,
    count: u64,
    pub overflows: usize,
}

impl<'a> CaptureTimer<'a> {
    pub fn new(capture: &'a PulseCapture, start: u16) -> Self {
        Self {
            capture,
            count: u64::from(start),
            overflows: 0,
        }
    }

    /// Let time pass, raising the overflow interrupt at each wrap
    pub fn elapse(&mut self, micros: u32) {
        let period = CAPTURE_OVERFLOW_PERIOD.as_micros();
        let total = self.count + u64::from(micros);
        for _ in 0..total / period {
            self.capture.on_overflow();
            self.overflows += 1;
        }
        self.count = total % period;
    }

    /// Signal edge ending a span of the given kind
    pub fn edge(&mut self, span: Span) {
        let timestamp = u16::try_from(self.count).unwrap();
        if self.capture.on_capture(timestamp, span) == CaptureAction::RestartTimer {
            self.count = 0;
        }
    }

    /// Idle line for `gap` µs, then the given spans edge by edge
    pub fn transmit(&mut self, gap: u32, spans: &[(Span, u16)]) {
        self.elapse(gap);
        self.edge(Span::Pause);
        for &(span, length) in spans {
            self.elapse(u32::from(length));
            self.edge(span);
        }
    }
}
