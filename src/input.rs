//! Input processing module
//!
//! Drains the event source once per cycle and frames raw MIDI into a batch
//! of piano events for the renderer.

use crate::config::PianoConfig;
use crate::event::{EventBatch, PianoEvent};
use crate::midi::{MarkerParser, MidiMessage};

/// Abstract MIDI input
///
/// Implement this trait to feed the renderer from a driver, a channel or a
/// recording. `try_receive` must not block: it returns `Ok(None)` once
/// nothing is queued.
pub trait EventSource {
    type Error;

    /// Take the next pending message, if any
    fn try_receive(&mut self) -> Result<Option<MidiMessage>, Self::Error>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    type Error = S::Error;

    fn try_receive(&mut self) -> Result<Option<MidiMessage>, Self::Error> {
        (**self).try_receive()
    }
}

/// Collects framed events from an [`EventSource`]
///
/// N is the maximum number of events taken per cycle. Once the batch is
/// full, draining stops and the rest stays queued for the next cycle.
pub struct InputProcessor<S: EventSource, const N: usize> {
    source: S,
    parser: MarkerParser,
    batch: EventBatch<N>,
}

impl<S: EventSource, const N: usize> InputProcessor<S, N> {
    pub const fn new(source: S, parser: MarkerParser) -> Self {
        Self {
            source,
            parser,
            batch: EventBatch::new(),
        }
    }

    pub const fn from_config(source: S, config: &PianoConfig) -> Self {
        Self::new(source, MarkerParser::from_config(config))
    }

    /// Drain all pending messages (non-blocking)
    ///
    /// Returns the events framed during this call, in receive order.
    pub fn process_pending(&mut self) -> Result<&[PianoEvent], S::Error> {
        self.batch.clear();

        while !self.batch.is_full() {
            let Some(message) = self.source.try_receive()? else {
                break;
            };
            if let Some(event) = self.parser.feed(message) {
                // Capacity checked by the loop condition
                let _ = self.batch.push(event);
            }
        }

        if self.batch.is_full() {
            log::debug!("event batch full ({} events), deferring the rest", N);
        }

        Ok(self.batch.as_slice())
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
