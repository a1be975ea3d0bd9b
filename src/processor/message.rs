//! State of the message currently being reassembled.
//!
//! At most one message is in flight per connection. The state is created
//! implicitly by the first data frame, extended by continuation frames and
//! cleared on completion or error.

use bytes::BytesMut;

use super::{ProcessorError, ProcessorEvent, Utf8Decoder};
use crate::protocol::OpCode;

/// Accumulated payload of the message in progress.
#[derive(Debug)]
enum Body {
    Text { text: String, decoder: Utf8Decoder },
    Binary(BytesMut),
}

/// A data message that has started but not yet received its final frame.
#[derive(Debug)]
pub(super) struct PartialMessage {
    opcode: OpCode,
    body: Body,
    received: u64,
}

impl PartialMessage {
    /// Start a message from the opcode of its first frame.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::InvalidOpcode`] unless `opcode` is text or
    /// binary.
    pub(super) fn start(opcode: OpCode) -> Result<Self, ProcessorError> {
        let body = match opcode {
            OpCode::Text => Body::Text {
                text: String::new(),
                decoder: Utf8Decoder::new(),
            },
            OpCode::Binary => Body::Binary(BytesMut::new()),
            other => return Err(ProcessorError::InvalidOpcode(other.as_u8())),
        };
        Ok(Self {
            opcode,
            body,
            received: 0,
        })
    }

    /// Opcode locked in by the first frame.
    pub(super) fn opcode(&self) -> OpCode { self.opcode }

    /// Raw payload bytes accepted so far.
    pub(super) fn received(&self) -> u64 { self.received }

    /// Check that `incoming` more bytes keep the message within `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::MessageTooLarge`] when the prospective size
    /// exceeds `limit`.
    pub(super) fn check_size_limit(&self, incoming: usize, limit: u64) -> Result<(), ProcessorError> {
        let attempted = u64::try_from(incoming)
            .ok()
            .and_then(|incoming| self.received.checked_add(incoming))
            .unwrap_or(u64::MAX);
        if attempted > limit {
            return Err(ProcessorError::MessageTooLarge { attempted, limit });
        }
        Ok(())
    }

    /// Append a text frame payload, returning the text it completed.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::InvalidUtf8`] if the payload is not valid
    /// UTF-8, or if `is_final` is set while a code point is still unfinished.
    pub(super) fn push_text(&mut self, payload: &[u8], is_final: bool) -> Result<String, ProcessorError> {
        let Body::Text { text, decoder } = &mut self.body else {
            return Err(ProcessorError::InvalidOpcode(self.opcode.as_u8()));
        };
        let chunk = decoder.decode(payload)?;
        if is_final && decoder.is_incomplete() {
            return Err(ProcessorError::InvalidUtf8);
        }
        text.push_str(&chunk);
        self.received = self.received.saturating_add(payload.len() as u64);
        Ok(chunk)
    }

    /// Append a binary frame payload.
    pub(super) fn push_binary(&mut self, payload: &[u8]) {
        if let Body::Binary(buffer) = &mut self.body {
            buffer.extend_from_slice(payload);
            self.received = self.received.saturating_add(payload.len() as u64);
        }
    }

    /// Consume the completed message, producing its terminal event.
    pub(super) fn finish(self) -> ProcessorEvent {
        match self.body {
            Body::Text { text, .. } => ProcessorEvent::TextMessage(text),
            Body::Binary(buffer) => ProcessorEvent::BinaryMessage(buffer.freeze()),
        }
    }
}
