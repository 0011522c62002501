mod tests {
    use piano_light_composer::math8::{decay8, div_round, scale8};

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
        assert_eq!(scale8(255, 255), 255);
    }

    #[test]
    fn test_div_round() {
        assert_eq!(div_round(1, 2), 1);
        assert_eq!(div_round(3, 2), 2);
        assert_eq!(div_round(4, 3), 1);
        assert_eq!(div_round(5, 3), 2);
        assert_eq!(div_round(5, 0), 0);
    }

    #[test]
    fn test_decay8() {
        assert_eq!(decay8(0, 5.0), 0);
        assert_eq!(decay8(255, 12.75), 242);
        assert_eq!(decay8(10, 0.6375), 9);
        assert_eq!(decay8(5, 12.75), 0);
        assert_eq!(decay8(10, 0.01), 9);
    }
}
