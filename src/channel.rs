//! MIDI hand-off between a receiving thread and the render loop.
//!
//! A bounded queue built on `critical-section` and `heapless::Deque`. The
//! receiving side (a driver callback or interrupt) pushes whole messages; the
//! render loop drains them at the start of each cycle, so a cycle either sees
//! a message or it does not.

use core::cell::RefCell;
use core::convert::Infallible;

use critical_section::Mutex;
use heapless::Deque;

use crate::input::EventSource;
use crate::midi::MidiMessage;

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError(pub MidiMessage);

struct Queue<const SIZE: usize> {
    messages: Deque<MidiMessage, SIZE>,
    dropped: u32,
}

/// A bounded, thread-safe MIDI message queue.
pub struct MessageChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Queue<SIZE>>>,
}

impl<const SIZE: usize> MessageChannel<SIZE> {
    /// Create a new empty channel.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Queue {
                messages: Deque::new(),
                dropped: 0,
            })),
        }
    }

    /// Get a sender handle for this channel.
    pub const fn sender(&self) -> MessageSender<'_, SIZE> {
        MessageSender { channel: self }
    }

    /// Get a receiver handle for this channel.
    pub const fn receiver(&self) -> MessageReceiver<'_, SIZE> {
        MessageReceiver { channel: self }
    }

    /// Try to queue a message.
    ///
    /// A full channel rejects the message and counts it as dropped.
    pub fn try_send(&self, message: MidiMessage) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.messages.push_back(message).map_err(|message| {
                queue.dropped = queue.dropped.saturating_add(1);
                TrySendError(message)
            })
        })
    }

    /// Take the oldest queued message, if any.
    pub fn try_receive(&self) -> Option<MidiMessage> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().messages.pop_front())
    }

    /// Number of messages currently queued.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().messages.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of messages rejected because the channel was full.
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().dropped)
    }
}

impl<const SIZE: usize> Default for MessageChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle for a [`MessageChannel`].
#[derive(Clone, Copy)]
pub struct MessageSender<'a, const SIZE: usize> {
    channel: &'a MessageChannel<SIZE>,
}

impl<const SIZE: usize> MessageSender<'_, SIZE> {
    pub fn try_send(&self, message: MidiMessage) -> Result<(), TrySendError> {
        self.channel.try_send(message)
    }

    /// Decode raw bytes and queue the result; undecodable input is ignored.
    pub fn try_send_bytes(&self, data: &[u8]) -> Result<(), TrySendError> {
        match MidiMessage::from_bytes(data) {
            Some(message) => self.try_send(message),
            None => Ok(()),
        }
    }
}

/// Consumer handle for a [`MessageChannel`].
///
/// The channel cannot fail, so as an [`EventSource`] it never errors.
#[derive(Clone, Copy)]
pub struct MessageReceiver<'a, const SIZE: usize> {
    channel: &'a MessageChannel<SIZE>,
}

impl<const SIZE: usize> EventSource for MessageReceiver<'_, SIZE> {
    type Error = Infallible;

    fn try_receive(&mut self) -> Result<Option<MidiMessage>, Self::Error> {
        Ok(self.channel.try_receive())
    }
}
