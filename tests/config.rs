mod tests {
    use embassy_time::Duration;
    use myrtio_light_node::config::{DEFAULT_IR_ADDRESS, DEFAULT_STARTUP_DELAY};
    use myrtio_light_node::state::NodeState;
    use myrtio_light_node::{BusConfig, IrConfig, NodeConfig, OutputConfig};

    #[test]
    fn test_defaults_match_firmware() {
        let ir = IrConfig::default();
        assert_eq!(ir.accepted_address, DEFAULT_IR_ADDRESS);
        assert_eq!(ir.repeat_timeout_ticks, 4);

        let bus = BusConfig::default();
        assert_eq!(bus.startup_delay, DEFAULT_STARTUP_DELAY);
        assert_eq!((bus.scan_first, bus.scan_last), (0x08, 0x77));

        assert_eq!(OutputConfig::default().off_threshold, 2);
        assert_eq!(NodeConfig::default().initial, NodeState::BOOT);
    }

    #[test]
    fn test_repeat_timeout_spans_overflow_ticks() {
        let ir = IrConfig::default();
        assert_eq!(ir.repeat_timeout(), Duration::from_micros(4 * 65_536));

        let ir = IrConfig {
            repeat_timeout_ticks: 0,
            ..IrConfig::default()
        };
        assert_eq!(ir.repeat_timeout(), Duration::from_ticks(0));
    }
}
