use heapless::Vec;

/// Keyboard event after MIDI framing, addressed by zero-based key index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PianoEvent {
    /// Key struck
    NoteOn { key: u8, velocity: u8 },
    /// Key released
    NoteOff { key: u8 },
    /// Sustain pedal moved (0-127)
    Pedal(u8),
}

/// Events collected for a single cycle
///
/// N is the maximum number of events drained per cycle
pub type EventBatch<const N: usize> = Vec<PianoEvent, N>;
