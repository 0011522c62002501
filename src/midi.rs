//! MIDI message decoding and keyboard framing
//!
//! The target keyboard announces every note message with a control change
//! on controller 88. [`MarkerParser`] turns that two-message sequence, plus
//! sustain pedal controller changes, into [`PianoEvent`]s.

use crate::config::PianoConfig;
use crate::event::PianoEvent;

/// Controller announcing that the next message is a note event
pub const CC_NOTE_MARKER: u8 = 88;

/// Sustain pedal controller
pub const CC_SUSTAIN: u8 = 64;

const STATUS_NOTE_OFF: u8 = 0x80;
const STATUS_NOTE_ON: u8 = 0x90;
const STATUS_CONTROL_CHANGE: u8 = 0xB0;

/// Channel voice message body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    ControlChange { controller: u8, value: u8 },
    /// Any other channel voice message
    Other,
}

/// MIDI message as delivered by the event source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiMessage {
    /// Channel (0-15)
    pub channel: u8,
    pub kind: MessageKind,
}

impl MidiMessage {
    pub const fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        Self {
            channel,
            kind: MessageKind::NoteOn { note, velocity },
        }
    }

    pub const fn note_off(channel: u8, note: u8, velocity: u8) -> Self {
        Self {
            channel,
            kind: MessageKind::NoteOff { note, velocity },
        }
    }

    pub const fn control_change(channel: u8, controller: u8, value: u8) -> Self {
        Self {
            channel,
            kind: MessageKind::ControlChange { controller, value },
        }
    }

    /// Decode a raw channel voice message
    ///
    /// Returns `None` for system messages and truncated input. A note-on with
    /// velocity 0 stays a note-on.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        let (&status, body) = data.split_first()?;
        if !(0x80..0xF0).contains(&status) {
            return None;
        }
        let channel = status & 0x0F;
        let kind = match (status & 0xF0, body) {
            (STATUS_NOTE_OFF, [note, velocity, ..]) => MessageKind::NoteOff {
                note: *note,
                velocity: *velocity,
            },
            (STATUS_NOTE_ON, [note, velocity, ..]) => MessageKind::NoteOn {
                note: *note,
                velocity: *velocity,
            },
            (STATUS_CONTROL_CHANGE, [controller, value, ..]) => MessageKind::ControlChange {
                controller: *controller,
                value: *value,
            },
            (STATUS_NOTE_OFF | STATUS_NOTE_ON | STATUS_CONTROL_CHANGE, _) => return None,
            _ => MessageKind::Other,
        };
        Some(Self { channel, kind })
    }

    /// Encode back to raw bytes; `None` for [`MessageKind::Other`]
    pub const fn to_bytes(&self) -> Option<[u8; 3]> {
        let channel = self.channel & 0x0F;
        match self.kind {
            MessageKind::NoteOn { note, velocity } => {
                Some([STATUS_NOTE_ON | channel, note, velocity])
            }
            MessageKind::NoteOff { note, velocity } => {
                Some([STATUS_NOTE_OFF | channel, note, velocity])
            }
            MessageKind::ControlChange { controller, value } => {
                Some([STATUS_CONTROL_CHANGE | channel, controller, value])
            }
            MessageKind::Other => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Normal,
    /// Marker seen; the next message on the channel is the note event
    AwaitingNote,
}

/// Two-state parser for the keyboard's marker protocol
///
/// Only messages on the configured channel are considered. A note message
/// without a preceding marker is dropped. The marker is consumed by exactly
/// one following message: if that message is not a note, the marker is
/// abandoned and the message is handled as usual.
#[derive(Debug, Clone)]
pub struct MarkerParser {
    channel: u8,
    lowest_note: u8,
    highest_note: u8,
    state: ParserState,
}

impl MarkerParser {
    pub const fn new(channel: u8, lowest_note: u8, highest_note: u8) -> Self {
        Self {
            channel,
            lowest_note,
            highest_note,
            state: ParserState::Normal,
        }
    }

    pub const fn from_config(config: &PianoConfig) -> Self {
        Self::new(config.channel, config.lowest_note, config.highest_note)
    }

    /// Check if a marker has been seen and not yet consumed
    pub fn is_awaiting_note(&self) -> bool {
        self.state == ParserState::AwaitingNote
    }

    /// Feed one message, returning the event it completes
    pub fn feed(&mut self, message: MidiMessage) -> Option<PianoEvent> {
        if message.channel != self.channel {
            return None;
        }

        let awaiting = self.state == ParserState::AwaitingNote;
        self.state = ParserState::Normal;

        match message.kind {
            MessageKind::ControlChange {
                controller: CC_NOTE_MARKER,
                ..
            } => {
                self.state = ParserState::AwaitingNote;
                None
            }
            MessageKind::ControlChange {
                controller: CC_SUSTAIN,
                value,
            } => Some(PianoEvent::Pedal(value)),
            MessageKind::NoteOn { note, velocity } if awaiting => {
                let key = self.key_of(note)?;
                Some(PianoEvent::NoteOn { key, velocity })
            }
            MessageKind::NoteOff { note, .. } if awaiting => {
                let key = self.key_of(note)?;
                Some(PianoEvent::NoteOff { key })
            }
            _ => {
                log::trace!("dropping unframed message {:?}", message);
                None
            }
        }
    }

    /// Convert a MIDI note to a key index, `None` outside the keyboard
    fn key_of(&self, note: u8) -> Option<u8> {
        if note < self.lowest_note || note > self.highest_note {
            log::trace!("dropping note {} outside keyboard", note);
            return None;
        }
        Some(note - self.lowest_note)
    }
}
