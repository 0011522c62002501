use crate::config::KEY_COUNT;
use crate::decay::DecayModel;
use crate::math8::decay8;

/// Level of a freshly struck key
pub const STRUCK_LEVEL: u8 = 255;

/// Current intensity of every key on the keyboard
#[derive(Debug, Clone)]
pub struct NoteTable {
    levels: [u8; KEY_COUNT],
    fade_off_floor: u8,
}

impl NoteTable {
    /// Create a silent table
    pub const fn new(fade_off_floor: u8) -> Self {
        Self {
            levels: [0; KEY_COUNT],
            fade_off_floor,
        }
    }

    /// Strike a key
    ///
    /// Velocity is accepted but the key always lights at full intensity.
    pub fn apply_note_on(&mut self, key: u8, _velocity: u8) {
        if let Some(level) = self.levels.get_mut(usize::from(key)) {
            *level = STRUCK_LEVEL;
        }
    }

    /// Release a key, dropping it to the fade-off floor
    pub fn apply_note_off(&mut self, key: u8) {
        if let Some(level) = self.levels.get_mut(usize::from(key)) {
            *level = self.fade_off_floor;
        }
    }

    /// Advance every key by one decay step
    pub fn tick_decay(&mut self, decay: &DecayModel) {
        for (key, level) in (0u8..).zip(self.levels.iter_mut()) {
            *level = decay8(*level, decay.step(key));
        }
    }

    /// Copy of the current levels
    pub const fn snapshot(&self) -> [u8; KEY_COUNT] {
        self.levels
    }

    pub fn level(&self, key: u8) -> u8 {
        self.levels.get(usize::from(key)).copied().unwrap_or(0)
    }

    pub const fn fade_off_floor(&self) -> u8 {
        self.fade_off_floor
    }

    /// Check if every key is dark
    pub fn is_silent(&self) -> bool {
        self.levels.iter().all(|level| *level == 0)
    }

    pub(crate) fn levels(&self) -> &[u8; KEY_COUNT] {
        &self.levels
    }
}
