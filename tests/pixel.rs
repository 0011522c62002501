mod tests {
    use piano_light_composer::pixel::{PixelMapper, note_to_pixel};

    const LED_COUNT: usize = 81;

    #[test]
    fn test_endpoints_map_exactly() {
        assert_eq!(note_to_pixel(0, 0, 87, LED_COUNT), 0);
        assert_eq!(note_to_pixel(87, 0, 87, LED_COUNT), LED_COUNT - 1);

        // Raw MIDI window
        assert_eq!(note_to_pixel(21, 21, 108, LED_COUNT), 0);
        assert_eq!(note_to_pixel(108, 21, 108, LED_COUNT), LED_COUNT - 1);
    }

    #[test]
    fn test_key_and_midi_windows_agree() {
        for key in 0..=87u8 {
            assert_eq!(
                note_to_pixel(key, 0, 87, LED_COUNT),
                note_to_pixel(key + 21, 21, 108, LED_COUNT)
            );
        }
    }

    #[test]
    fn test_monotonic() {
        let mut previous = 0;
        for key in 0..=87u8 {
            let pixel = note_to_pixel(key, 0, 87, LED_COUNT);
            assert!(pixel >= previous, "key {key} went back to {pixel}");
            assert!(pixel < LED_COUNT);
            previous = pixel;
        }
    }

    #[test]
    fn test_middle_c() {
        assert_eq!(note_to_pixel(39, 0, 87, LED_COUNT), 36);
    }

    #[test]
    fn test_half_rounds_away_from_zero() {
        // 1 * 2 / 4 = 0.5, 3 * 2 / 4 = 1.5
        assert_eq!(note_to_pixel(1, 0, 4, 3), 1);
        assert_eq!(note_to_pixel(3, 0, 4, 3), 2);
        assert_eq!(note_to_pixel(2, 0, 4, 3), 1);
    }

    #[test]
    fn test_out_of_window_clamps() {
        assert_eq!(note_to_pixel(5, 10, 20, 11), 0);
        assert_eq!(note_to_pixel(30, 10, 20, 11), 10);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(note_to_pixel(5, 5, 5, 10), 0);
        assert_eq!(note_to_pixel(5, 9, 3, 10), 0);
        assert_eq!(note_to_pixel(5, 0, 87, 0), 0);
        assert_eq!(note_to_pixel(87, 0, 87, 1), 0);
    }

    #[test]
    fn test_mapper_matches_function() {
        let mapper = PixelMapper::new(0, 87, LED_COUNT);
        assert_eq!(mapper.led_count(), LED_COUNT);
        for key in 0..=87u8 {
            assert_eq!(mapper.map(key), note_to_pixel(key, 0, 87, LED_COUNT));
        }
    }
}
