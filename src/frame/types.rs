//! The frame value handed from a reader to the processor.

use bytes::Bytes;

use crate::protocol::{CloseCode, OpCode};

/// Reader verdict attached to a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Validity {
    Valid,
    Invalid { code: CloseCode, reason: String },
}

/// One WebSocket frame, already unmasked and delimited by a
/// [`FrameReader`](super::FrameReader).
///
/// A reader that detects a malformed frame still yields a `Frame`, built with
/// [`Frame::invalid`], carrying the close code and reason describing the
/// problem. The processor reports that diagnosis verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    opcode: OpCode,
    is_final: bool,
    payload: Bytes,
    validity: Validity,
}

impl Frame {
    /// Build a valid frame.
    #[must_use]
    pub fn new(opcode: OpCode, is_final: bool, payload: impl Into<Bytes>) -> Self {
        Self {
            opcode,
            is_final,
            payload: payload.into(),
            validity: Validity::Valid,
        }
    }

    /// Build a frame the reader rejected with `code` and `reason`.
    #[must_use]
    pub fn invalid(code: CloseCode, reason: impl Into<String>) -> Self {
        Self {
            opcode: OpCode::Close,
            is_final: true,
            payload: Bytes::new(),
            validity: Validity::Invalid {
                code,
                reason: reason.into(),
            },
        }
    }

    /// Text frame carrying `text`.
    #[must_use]
    pub fn text(text: impl Into<Bytes>, is_final: bool) -> Self {
        Self::new(OpCode::Text, is_final, text)
    }

    /// Binary frame carrying `payload`.
    #[must_use]
    pub fn binary(payload: impl Into<Bytes>, is_final: bool) -> Self {
        Self::new(OpCode::Binary, is_final, payload)
    }

    /// Continuation frame carrying `payload`.
    #[must_use]
    pub fn continuation(payload: impl Into<Bytes>, is_final: bool) -> Self {
        Self::new(OpCode::Continue, is_final, payload)
    }

    /// Ping frame.
    #[must_use]
    pub fn ping(payload: impl Into<Bytes>) -> Self { Self::new(OpCode::Ping, true, payload) }

    /// Pong frame.
    #[must_use]
    pub fn pong(payload: impl Into<Bytes>) -> Self { Self::new(OpCode::Pong, true, payload) }

    /// Close frame with a raw, unparsed payload.
    #[must_use]
    pub fn close(payload: impl Into<Bytes>) -> Self { Self::new(OpCode::Close, true, payload) }

    /// Opcode of the frame.
    #[must_use]
    pub const fn opcode(&self) -> OpCode { self.opcode }

    /// Whether the FIN bit is set.
    #[must_use]
    pub const fn is_final(&self) -> bool { self.is_final }

    /// Whether this is a control frame.
    #[must_use]
    pub const fn is_control_frame(&self) -> bool { self.opcode.is_control() }

    /// Whether this is a data frame.
    #[must_use]
    pub const fn is_data_frame(&self) -> bool { self.opcode.is_data() }

    /// Whether this is a continuation frame.
    #[must_use]
    pub fn is_continuation_frame(&self) -> bool {
        self.is_data_frame() && self.opcode == OpCode::Continue
    }

    /// Borrow the payload.
    #[must_use]
    pub fn payload(&self) -> &Bytes { &self.payload }

    /// Consume the frame, returning its payload.
    #[must_use]
    pub fn into_payload(self) -> Bytes { self.payload }

    /// Whether the reader accepted the frame.
    #[must_use]
    pub fn is_valid(&self) -> bool { matches!(self.validity, Validity::Valid) }

    /// Close code and reason the reader attached to an invalid frame.
    #[must_use]
    pub fn diagnosis(&self) -> Option<(CloseCode, &str)> {
        match &self.validity {
            Validity::Valid => None,
            Validity::Invalid { code, reason } => Some((*code, reason.as_str())),
        }
    }
}
