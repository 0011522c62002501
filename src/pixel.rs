//! Keyboard to strip projection
//!
//! Maps a note window linearly onto the LED strip. The strip is usually
//! shorter than the keyboard, so neighbouring notes may share an LED.

use crate::math8::div_round;

/// Map `note` from `[low, high]` onto `[0, led_count - 1]`
///
/// `low` maps to 0 and `high` to the last LED exactly. Notes outside the
/// window are clamped into it. Ties round away from zero.
#[allow(clippy::cast_lossless)]
pub const fn note_to_pixel(note: u8, low: u8, high: u8, led_count: usize) -> usize {
    if high <= low || led_count == 0 {
        return 0;
    }
    let note = if note < low {
        low
    } else if note > high {
        high
    } else {
        note
    };
    let offset = (note - low) as usize;
    let span = (high - low) as usize;
    div_round(offset * (led_count - 1), span)
}

/// Note window bound to a strip length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelMapper {
    low: u8,
    high: u8,
    led_count: usize,
}

impl PixelMapper {
    pub const fn new(low: u8, high: u8, led_count: usize) -> Self {
        Self {
            low,
            high,
            led_count,
        }
    }

    /// Get the LED index for a note
    pub const fn map(&self, note: u8) -> usize {
        note_to_pixel(note, self.low, self.high, self.led_count)
    }

    /// Highest note of the window
    pub const fn high(&self) -> u8 {
        self.high
    }

    /// Number of LEDs in the target strip
    pub const fn led_count(&self) -> usize {
        self.led_count
    }
}
