#![no_std]

pub mod channel;
pub mod color;
pub mod config;
pub mod decay;
pub mod error;
pub mod event;
pub mod frame_scheduler;
pub mod input;
#[cfg(feature = "esp32-log")]
pub mod logger;
pub mod math8;
pub mod midi;
pub mod notes;
pub mod pixel;
pub mod renderer;
pub mod sustain;

pub use channel::{MessageChannel, MessageReceiver, MessageSender};
pub use config::{KEY_COUNT, PianoConfig};
pub use decay::{DecayModel, decay_step};
pub use error::{ConfigError, CycleError};
pub use event::{EventBatch, PianoEvent};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use input::{EventSource, InputProcessor};
pub use midi::{MarkerParser, MessageKind, MidiMessage};
pub use notes::NoteTable;
pub use pixel::{PixelMapper, note_to_pixel};
pub use renderer::Renderer;
pub use sustain::{SustainGate, should_display};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The frame scheduler is generic over this trait; an error ends the
/// render loop.
pub trait OutputDriver {
    type Error;

    /// Write colors to the LED strip and latch them
    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error>;
}
