mod tests {
    use piano_light_composer::{ConfigError, Duration, PianoConfig};

    #[test]
    fn test_default_is_valid() {
        let config = PianoConfig::default();
        assert_eq!(config, PianoConfig::DEFAULT);
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.key_span(), 87);
        assert!((config.cycle_seconds() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_configs() {
        let base = PianoConfig::DEFAULT;

        let config = PianoConfig { led_count: 0, ..base };
        assert_eq!(config.validate(), Err(ConfigError::EmptyStrip));

        let config = PianoConfig {
            lowest_note: 60,
            highest_note: 60,
            ..base
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNoteRange { .. })
        ));

        let config = PianoConfig {
            lowest_note: 20,
            highest_note: 108,
            ..base
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNoteRange { .. })
        ));

        let config = PianoConfig { channel: 16, ..base };
        assert_eq!(config.validate(), Err(ConfigError::InvalidChannel(16)));

        let config = PianoConfig {
            cycle_period: Duration::from_ticks(0),
            ..base
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCyclePeriod));

        let config = PianoConfig {
            lowest_decay: 0.0,
            ..base
        };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveDecay));
    }

    #[test]
    fn test_narrow_keyboard_is_valid() {
        let config = PianoConfig {
            lowest_note: 36,
            highest_note: 96,
            ..PianoConfig::DEFAULT
        };
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.key_span(), 60);
    }
}
