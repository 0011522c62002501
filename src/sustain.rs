//! Sustain pedal gating
//!
//! While the pedal is held, keys that have already faded to the release
//! floor are hidden; keys still above it keep their decay path. With the
//! pedal up every level is shown, including the low fade tails.

/// Highest pedal position
pub const PEDAL_MAX: u8 = 127;

/// Decide whether a key's level reaches the frame
pub const fn should_display(intensity: u8, fade_off_floor: u8, pedal: u8) -> bool {
    pedal == 0 || intensity > fade_off_floor
}

/// Current sustain pedal position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SustainGate {
    pedal: u8,
}

impl SustainGate {
    pub const fn new() -> Self {
        Self { pedal: 0 }
    }

    /// Set the pedal position, clamped to 0-127
    pub fn set(&mut self, value: u8) {
        self.pedal = value.min(PEDAL_MAX);
    }

    pub const fn position(&self) -> u8 {
        self.pedal
    }

    /// Check if the pedal is depressed at all
    pub const fn is_held(&self) -> bool {
        self.pedal > 0
    }

    pub const fn should_display(&self, intensity: u8, fade_off_floor: u8) -> bool {
        should_display(intensity, fade_off_floor, self.pedal)
    }
}
