//! Renderer configuration
//!
//! All values are plain data; [`PianoConfig::DEFAULT`] mirrors the reference
//! hardware setup (81 LEDs over a full 88-key keyboard, 20 Hz refresh).

use embassy_time::Duration;

use crate::error::ConfigError;

/// Number of keys tracked by the note table
pub const KEY_COUNT: usize = 88;

/// Highest MIDI note number
const MIDI_NOTE_MAX: u8 = 127;

/// Highest MIDI channel number
const MIDI_CHANNEL_MAX: u8 = 15;

/// Configuration for the piano renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PianoConfig {
    /// Number of LEDs in the strip
    pub led_count: usize,
    /// MIDI note number of key index 0
    pub lowest_note: u8,
    /// MIDI note number of the last key
    pub highest_note: u8,
    /// Time for the highest key to fade from 255 to 0, in seconds
    pub lowest_decay: f32,
    /// Time for the lowest key to fade from 255 to 0, in seconds
    pub highest_decay: f32,
    /// Level a key drops to on release
    pub fade_off_floor: u8,
    /// Duration of one render cycle
    pub cycle_period: Duration,
    /// MIDI channel to listen on (0-based)
    pub channel: u8,
    /// Global output brightness (0-255 = 0.0-1.0)
    pub brightness: u8,
}

impl PianoConfig {
    pub const DEFAULT: Self = Self {
        led_count: 81,
        lowest_note: 21,
        highest_note: 108,
        lowest_decay: 1.0,
        highest_decay: 20.0,
        fade_off_floor: 10,
        cycle_period: Duration::from_millis(50),
        channel: 0,
        brightness: 255,
    };

    /// Distance between the lowest and highest key, in key indices
    pub const fn key_span(&self) -> u8 {
        self.highest_note.saturating_sub(self.lowest_note)
    }

    /// Cycle period in seconds
    #[allow(clippy::cast_precision_loss)]
    pub fn cycle_seconds(&self) -> f32 {
        self.cycle_period.as_micros() as f32 / 1_000_000.0
    }

    /// Check the configuration before the first cycle runs
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.led_count == 0 {
            return Err(ConfigError::EmptyStrip);
        }
        if self.highest_note <= self.lowest_note
            || self.highest_note > MIDI_NOTE_MAX
            || usize::from(self.key_span()) >= KEY_COUNT
        {
            return Err(ConfigError::InvalidNoteRange {
                lowest: self.lowest_note,
                highest: self.highest_note,
            });
        }
        if self.channel > MIDI_CHANNEL_MAX {
            return Err(ConfigError::InvalidChannel(self.channel));
        }
        if self.cycle_period.as_micros() == 0 {
            return Err(ConfigError::ZeroCyclePeriod);
        }
        if !is_positive(self.lowest_decay) || !is_positive(self.highest_decay) {
            return Err(ConfigError::NonPositiveDecay);
        }
        Ok(())
    }
}

impl Default for PianoConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub(crate) fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
