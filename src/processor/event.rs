//! Events emitted by the processor and the sinks that receive them.

use std::collections::VecDeque;

use bytes::Bytes;
use tokio::sync::mpsc;

use super::ProcessorError;
use crate::protocol::CloseCode;

/// Application-visible outcome of processing frames.
///
/// For a data message the per-frame events (`TextFrame`/`BinaryFrame`) are
/// always emitted before the terminal `TextMessage`/`BinaryMessage`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessorEvent {
    /// Decoded text carried by one frame of a text message.
    TextFrame {
        /// Text decoded from this frame. Bytes of a code point split across
        /// frames are delivered with the frame that completes it.
        text: String,
        /// Whether this frame ends the message.
        is_last: bool,
    },
    /// Payload carried by one frame of a binary message.
    BinaryFrame {
        /// Frame payload.
        payload: Bytes,
        /// Whether this frame ends the message.
        is_last: bool,
    },
    /// A complete text message.
    TextMessage(String),
    /// A complete binary message.
    BinaryMessage(Bytes),
    /// A ping with its application data.
    Ping(Bytes),
    /// A pong with its application data.
    Pong(Bytes),
    /// The peer sent a close frame.
    Close {
        /// Status code, normalised when the peer's code or reason was invalid.
        code: CloseCode,
        /// Close reason.
        reason: String,
    },
    /// A fatal error; the message in progress was discarded.
    Error(ProcessorError),
}

impl ProcessorEvent {
    /// Whether the event reports an error.
    #[must_use]
    pub fn is_error(&self) -> bool { matches!(self, Self::Error(_)) }
}

/// Receiver for [`ProcessorEvent`] values.
pub trait EventSink {
    /// Deliver one event.
    fn emit(&mut self, event: ProcessorEvent);
}

impl EventSink for Vec<ProcessorEvent> {
    fn emit(&mut self, event: ProcessorEvent) { self.push(event); }
}

impl EventSink for VecDeque<ProcessorEvent> {
    fn emit(&mut self, event: ProcessorEvent) { self.push_back(event); }
}

impl EventSink for mpsc::UnboundedSender<ProcessorEvent> {
    fn emit(&mut self, event: ProcessorEvent) {
        if self.send(event).is_err() {
            log::debug!("event receiver dropped; discarding processor event");
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: ProcessorEvent) { (**self).emit(event); }
}
