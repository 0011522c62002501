//! Optional TOML overrides for the renderer configuration
//!
//! Every field is optional; missing fields keep the library defaults.
//!
//! ```toml
//! device = "CASIO"
//! led_count = 81
//! lowest_decay = 1.0
//! highest_decay = 20.0
//! cycle_ms = 50
//! ```

use std::error::Error;
use std::path::{Path, PathBuf};
use std::{fmt, fs, io};

use piano_light_composer::{Duration, PianoConfig};
use serde::Deserialize;

/// Port name substring used when none is configured
pub const DEFAULT_DEVICE: &str = "CASIO";

/// Failure to load a config file
#[derive(Debug)]
pub enum FileConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl fmt::Display for FileConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileConfigError::Read { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            FileConfigError::Parse { path, source } => {
                write!(f, "invalid {}: {}", path.display(), source)
            }
        }
    }
}

impl Error for FileConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FileConfigError::Read { source, .. } => Some(source),
            FileConfigError::Parse { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub device: Option<String>,
    pub led_count: Option<usize>,
    pub lowest_note: Option<u8>,
    pub highest_note: Option<u8>,
    pub lowest_decay: Option<f32>,
    pub highest_decay: Option<f32>,
    pub fade_off_floor: Option<u8>,
    pub cycle_ms: Option<u64>,
    pub channel: Option<u8>,
    pub brightness: Option<u8>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, FileConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| FileConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| FileConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layer the file values over `base`
    pub fn apply(&self, base: PianoConfig) -> PianoConfig {
        PianoConfig {
            led_count: self.led_count.unwrap_or(base.led_count),
            lowest_note: self.lowest_note.unwrap_or(base.lowest_note),
            highest_note: self.highest_note.unwrap_or(base.highest_note),
            lowest_decay: self.lowest_decay.unwrap_or(base.lowest_decay),
            highest_decay: self.highest_decay.unwrap_or(base.highest_decay),
            fade_off_floor: self.fade_off_floor.unwrap_or(base.fade_off_floor),
            cycle_period: self
                .cycle_ms
                .map_or(base.cycle_period, Duration::from_millis),
            channel: self.channel.unwrap_or(base.channel),
            brightness: self.brightness.unwrap_or(base.brightness),
        }
    }

    pub fn device(&self) -> &str {
        self.device.as_deref().unwrap_or(DEFAULT_DEVICE)
    }
}
