//! Pitch-dependent decay
//!
//! The time a key takes to fade from full intensity to zero varies linearly
//! across the keyboard: the lowest key rings for `max_decay` seconds, the
//! highest for `min_decay`.

use crate::config::{KEY_COUNT, PianoConfig, is_positive};
use crate::error::ConfigError;

/// Full-scale intensity the decay durations refer to
const FULL_SCALE: f32 = 255.0;

/// Index of the highest key
#[allow(clippy::cast_precision_loss)]
const LAST_KEY: f32 = (KEY_COUNT - 1) as f32;

/// Total fade time of a key in seconds
pub fn decay_duration(key: u8, min_decay: f32, max_decay: f32) -> f32 {
    let slope = (min_decay - max_decay) / LAST_KEY;
    max_decay + f32::from(key) * slope
}

/// Intensity to subtract from `key` every cycle
///
/// Returns `None` if the key's fade time or the cycle is not positive.
pub fn decay_step(key: u8, min_decay: f32, max_decay: f32, cycle: f32) -> Option<f32> {
    let duration = decay_duration(key, min_decay, max_decay);
    if !is_positive(duration) || !is_positive(cycle) {
        return None;
    }
    Some(FULL_SCALE / (duration / cycle))
}

/// Precomputed per-key decay steps
#[derive(Debug, Clone)]
pub struct DecayModel {
    steps: [f32; KEY_COUNT],
}

impl DecayModel {
    /// Build the step table, failing on a non-positive fade time or cycle
    pub fn new(min_decay: f32, max_decay: f32, cycle: f32) -> Result<Self, ConfigError> {
        if !is_positive(cycle) {
            return Err(ConfigError::ZeroCyclePeriod);
        }
        let mut steps = [0.0; KEY_COUNT];
        for (key, step) in (0u8..).zip(steps.iter_mut()) {
            *step = decay_step(key, min_decay, max_decay, cycle)
                .ok_or(ConfigError::NonPositiveDecay)?;
        }
        Ok(Self { steps })
    }

    pub fn from_config(config: &PianoConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.lowest_decay,
            config.highest_decay,
            config.cycle_seconds(),
        )
    }

    /// Per-cycle step of a key; zero for keys outside the keyboard
    pub fn step(&self, key: u8) -> f32 {
        self.steps.get(usize::from(key)).copied().unwrap_or(0.0)
    }
}
