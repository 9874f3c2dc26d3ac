mod support;

mod tests {
    use myrtio_light_node::ir::timing::{
        BIT_0_PAUSE_US, BIT_PULSE_US, FRAME_SPANS, START_PAUSE_US, START_PULSE_US,
    };
    use myrtio_light_node::ir::{
        CaptureAction, DecodedFrame, IrEvent, NecDecoder, PulseCapture, RawPulseBuffer, Span,
        decode_frame,
    };

    use super::support::{CaptureTimer, feed, frame_spans, nec_spans, repeat_spans};

    const ADDRESS: u16 = 0x00ef;

    fn scaled(spans: &[(Span, u16)], pulse_percent: u32, pause_percent: u32) -> Vec<(Span, u16)> {
        spans
            .iter()
            .map(|&(span, length)| {
                let percent = match span {
                    Span::Pulse => pulse_percent,
                    Span::Pause => pause_percent,
                };
                (span, (u32::from(length) * percent / 100) as u16)
            })
            .collect()
    }

    fn receive(spans: &[(Span, u16)]) -> Option<IrEvent> {
        let capture = PulseCapture::new(4);
        let mut decoder = NecDecoder::new();
        feed(&capture, spans);
        decoder.poll(&capture)
    }

    #[test]
    fn test_decode_nominal_frame() {
        let event = receive(&frame_spans(ADDRESS, 0x05));
        assert_eq!(event, Some(IrEvent::Press(DecodedFrame::new(ADDRESS, 0x05))));
    }

    #[test]
    fn test_address_byte_order() {
        let event = receive(&nec_spans([0x12, 0x34, 0x07, !0x07]));
        assert_eq!(event.map(|event| event.frame().address), Some(0x1234));
    }

    #[test]
    fn test_decode_frame_from_buffer() {
        let spans = frame_spans(ADDRESS, 0x17);
        let mut buffer: RawPulseBuffer = [0; FRAME_SPANS];
        for (slot, (_, length)) in buffer.iter_mut().zip(spans) {
            *slot = length;
        }
        assert_eq!(decode_frame(&buffer), Some(DecodedFrame::new(ADDRESS, 0x17)));

        buffer[1] = 2250;
        assert_eq!(decode_frame(&buffer), None);
    }

    #[test]
    fn test_tolerates_timing_drift() {
        let nominal = frame_spans(ADDRESS, 0xa5);
        let expected = Some(IrEvent::Press(DecodedFrame::new(ADDRESS, 0xa5)));

        for (pulse, pause) in [(60, 80), (140, 120), (60, 120), (140, 80)] {
            assert_eq!(receive(&scaled(&nominal, pulse, pause)), expected);
        }
    }

    #[test]
    fn test_rejects_large_drift() {
        let nominal = frame_spans(ADDRESS, 0xa5);
        assert_eq!(receive(&scaled(&nominal, 35, 100)), None);
        assert_eq!(receive(&scaled(&nominal, 170, 100)), None);
    }

    #[test]
    fn test_out_of_window_span_drops_partial_frame() {
        let capture = PulseCapture::new(4);
        let mut decoder = NecDecoder::new();

        let mut spans = frame_spans(ADDRESS, 0x03);
        spans[20] = (Span::Pulse, 1000);
        feed(&capture, &spans);
        assert_eq!(capture.is_frame_ready(), false);
        assert_eq!(decoder.poll(&capture), None);

        feed(&capture, &frame_spans(ADDRESS, 0x03));
        assert_eq!(
            decoder.poll(&capture),
            Some(IrEvent::Press(DecodedFrame::new(ADDRESS, 0x03)))
        );
    }

    #[test]
    fn test_bad_start_pulse_is_ignored() {
        let mut spans = frame_spans(ADDRESS, 0x03);
        spans[0] = (Span::Pulse, 3000);
        assert_eq!(receive(&spans), None);
    }

    #[test]
    fn test_checksum_failure_is_dropped() {
        let capture = PulseCapture::new(4);
        let mut decoder = NecDecoder::new();

        feed(&capture, &nec_spans([0x00, 0xef, 0x05, 0x05]));
        assert_eq!(capture.is_frame_ready(), true);
        assert_eq!(decoder.poll(&capture), None);
        assert_eq!(capture.is_frame_ready(), false);
        assert_eq!(decoder.last_frame(), None);
    }

    #[test]
    fn test_ready_frame_blocks_new_frames() {
        let capture = PulseCapture::new(4);
        let mut decoder = NecDecoder::new();

        feed(&capture, &frame_spans(ADDRESS, 0x04));
        feed(&capture, &frame_spans(ADDRESS, 0x09));
        assert_eq!(
            decoder.poll(&capture),
            Some(IrEvent::Press(DecodedFrame::new(ADDRESS, 0x04)))
        );
        assert_eq!(decoder.poll(&capture), None);
    }

    #[test]
    fn test_repeat_replays_last_frame() {
        let capture = PulseCapture::new(4);
        let mut decoder = NecDecoder::new();

        feed(&capture, &frame_spans(ADDRESS, 0x00));
        assert!(decoder.poll(&capture).is_some());

        feed(&capture, &repeat_spans());
        assert_eq!(
            decoder.poll(&capture),
            Some(IrEvent::Repeat(DecodedFrame::new(ADDRESS, 0x00)))
        );
        assert_eq!(decoder.poll(&capture), None);
    }

    #[test]
    fn test_repeat_before_any_frame_is_ignored() {
        assert_eq!(receive(&repeat_spans()), None);
    }

    #[test]
    fn test_repeat_expires_after_timeout_ticks() {
        let capture = PulseCapture::new(4);
        let mut decoder = NecDecoder::new();

        feed(&capture, &frame_spans(ADDRESS, 0x01));
        assert!(decoder.poll(&capture).is_some());

        for _ in 0..3 {
            capture.on_overflow();
        }
        feed(&capture, &repeat_spans());
        assert!(decoder.poll(&capture).is_some_and(|event| event.is_repeat()));

        // honored repeat restarts the window
        for _ in 0..3 {
            capture.on_overflow();
        }
        feed(&capture, &repeat_spans());
        assert!(decoder.poll(&capture).is_some_and(|event| event.is_repeat()));

        for _ in 0..4 {
            capture.on_overflow();
        }
        feed(&capture, &repeat_spans());
        assert_eq!(decoder.poll(&capture), None);
    }

    #[test]
    fn test_overflow_drops_partial_frame() {
        let capture = PulseCapture::new(4);
        let spans = frame_spans(ADDRESS, 0x02);

        feed(&capture, &spans[..10]);
        assert_eq!(capture.position(), 10);

        capture.on_overflow();
        assert_eq!(capture.position(), 0);

        feed(&capture, &spans[10..]);
        assert_eq!(capture.is_frame_ready(), false);
    }

    #[test]
    fn test_capture_timestamps_wrap() {
        let capture = PulseCapture::new(4);
        let mut decoder = NecDecoder::new();

        // counter wraps while the line is still idle
        let mut timer = CaptureTimer::new(&capture, 60_000);
        timer.transmit(10_000, &frame_spans(ADDRESS, 0x0c));

        assert_eq!(timer.overflows, 1);
        assert_eq!(
            decoder.poll(&capture),
            Some(IrEvent::Press(DecodedFrame::new(ADDRESS, 0x0c)))
        );
    }

    #[test]
    fn test_frames_decode_from_any_counter_phase() {
        for command in [0x05, 0x00, 0xff] {
            for phase in (0..u16::MAX).step_by(512) {
                let capture = PulseCapture::new(4);
                let mut decoder = NecDecoder::new();
                let mut timer = CaptureTimer::new(&capture, phase);

                timer.transmit(20_000, &frame_spans(ADDRESS, command));
                assert_eq!(
                    decoder.poll(&capture),
                    Some(IrEvent::Press(DecodedFrame::new(ADDRESS, command))),
                    "command {command:#04x} from phase {phase}"
                );
            }
        }
    }

    #[test]
    fn test_held_button_repeats_across_overflows() {
        let capture = PulseCapture::new(4);
        let mut decoder = NecDecoder::new();
        let mut timer = CaptureTimer::new(&capture, 30_000);

        timer.transmit(10_000, &frame_spans(ADDRESS, 0x01));
        assert!(decoder.poll(&capture).is_some());

        for _ in 0..3 {
            timer.transmit(40_000, &repeat_spans());
            assert_eq!(
                decoder.poll(&capture),
                Some(IrEvent::Repeat(DecodedFrame::new(ADDRESS, 0x01)))
            );
        }

        // released long enough for the repeat window to close
        timer.elapse(300_000);
        timer.transmit(0, &repeat_spans());
        assert_eq!(decoder.poll(&capture), None);
    }

    #[test]
    fn test_counter_restarts_only_before_data_bits() {
        let capture = PulseCapture::new(4);
        assert_eq!(capture.on_capture(1_234, Span::Pause), CaptureAction::RestartTimer);
        assert_eq!(capture.on_capture(START_PULSE_US, Span::Pulse), CaptureAction::RestartTimer);
        assert_eq!(capture.on_capture(START_PAUSE_US, Span::Pause), CaptureAction::RestartTimer);
        assert_eq!(capture.position(), 2);
        assert_eq!(capture.on_capture(BIT_PULSE_US, Span::Pulse), CaptureAction::Continue);
        assert_eq!(
            capture.on_capture(BIT_PULSE_US + BIT_0_PAUSE_US, Span::Pause),
            CaptureAction::Continue
        );
        assert_eq!(capture.position(), 4);
    }

    #[test]
    fn test_lead_pause_splits_repeat_from_frame() {
        let capture = PulseCapture::new(4);
        capture.on_span(Span::Pulse, START_PULSE_US);
        capture.on_span(Span::Pause, START_PAUSE_US);
        capture.on_span(Span::Pulse, BIT_PULSE_US);
        capture.on_span(Span::Pause, BIT_0_PAUSE_US);
        assert_eq!(capture.position(), 4);
        assert_eq!(capture.take_repeat(), false);
    }
}
