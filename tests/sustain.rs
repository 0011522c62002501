mod tests {
    use piano_light_composer::sustain::{PEDAL_MAX, SustainGate, should_display};

    const FLOOR: u8 = 10;

    #[test]
    fn test_released_pedal_shows_everything() {
        assert!(should_display(0, FLOOR, 0));
        assert!(should_display(FLOOR, FLOOR, 0));
        assert!(should_display(255, FLOOR, 0));
    }

    #[test]
    fn test_held_pedal_hides_faded_keys() {
        assert!(!should_display(FLOOR, FLOOR, 1));
        assert!(!should_display(FLOOR - 1, FLOOR, 127));
        assert!(!should_display(0, FLOOR, 64));
        assert!(should_display(FLOOR + 1, FLOOR, 64));
        assert!(should_display(255, FLOOR, 127));
    }

    #[test]
    fn test_gate_clamps_position() {
        let mut gate = SustainGate::new();
        assert!(!gate.is_held());
        gate.set(200);
        assert_eq!(gate.position(), PEDAL_MAX);
        assert!(gate.is_held());
        assert!(!gate.should_display(FLOOR, FLOOR));
        gate.set(0);
        assert!(gate.should_display(FLOOR, FLOOR));
    }
}
