use smart_leds::RGB8;

use crate::math8::scale8;

pub type Rgb = RGB8;

/// Pixel with every channel off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Convert an LED level to its output color
///
/// Output is monochrome green: the level, scaled by brightness, drives the
/// green channel only.
pub const fn level_to_rgb(level: u8, brightness: u8) -> Rgb {
    Rgb {
        r: 0,
        g: scale8(level, brightness),
        b: 0,
    }
}
