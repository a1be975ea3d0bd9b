//! Error taxonomy reported by the data processor.
//!
//! Every variant is fatal for the message in progress. The caller decides
//! whether to close the transport, using [`ProcessorError::close_code`] as
//! the status code to send.
//!
//! # Error Categories
//!
//! - Sequencing: [`ProcessorError::UnexpectedContinuation`],
//!   [`ProcessorError::ExpectedContinuation`], [`ProcessorError::InvalidOpcode`] and
//!   [`ProcessorError::ClosePayloadTooSmall`].
//! - Resource limits: [`ProcessorError::MessageTooLarge`].
//! - Encoding: [`ProcessorError::InvalidUtf8`].
//! - Liveness: [`ProcessorError::Timeout`].
//! - Frame diagnoses passed through from the reader: [`ProcessorError::Frame`].

use thiserror::Error;

use crate::protocol::CloseCode;

/// Fatal condition surfaced through
/// [`ProcessorEvent::Error`](super::ProcessorEvent::Error).
///
/// The `Display` output is the human-readable close reason.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProcessorError {
    /// A continuation frame arrived while no message was in progress.
    #[error("Received Continuation frame, while there is nothing to continue.")]
    UnexpectedContinuation,

    /// A new text or binary frame interrupted a fragmented message.
    #[error("All data frames after the initial data frame must have opcode 0.")]
    ExpectedContinuation,

    /// The frame's opcode is reserved or outside the opcode space.
    #[error("Invalid opcode detected: {0}")]
    InvalidOpcode(u8),

    /// A close frame carried a single payload byte.
    #[error("Payload of close frame is too small.")]
    ClosePayloadTooSmall,

    /// Accepting the frame would push the message beyond the configured cap.
    #[error("Received message is too big.")]
    MessageTooLarge {
        /// Message size the frame would have produced.
        attempted: u64,
        /// Configured maximum message size.
        limit: u64,
    },

    /// A text payload was not valid UTF-8.
    #[error("Invalid UTF-8 code encountered.")]
    InvalidUtf8,

    /// The remainder of a started frame did not arrive in time.
    #[error("Timeout when reading data from socket.")]
    Timeout,

    /// The frame reader rejected a frame.
    #[error("{reason}")]
    Frame {
        /// Close code chosen by the reader.
        code: CloseCode,
        /// Reason given by the reader.
        reason: String,
    },
}

impl ProcessorError {
    /// Close code the connection should be closed with.
    #[must_use]
    pub fn close_code(&self) -> CloseCode {
        match self {
            Self::UnexpectedContinuation
            | Self::ExpectedContinuation
            | Self::InvalidOpcode(_)
            | Self::ClosePayloadTooSmall => CloseCode::PROTOCOL_ERROR,
            Self::MessageTooLarge { .. } => CloseCode::TOO_MUCH_DATA,
            Self::InvalidUtf8 => CloseCode::WRONG_DATATYPE,
            Self::Timeout => CloseCode::GOING_AWAY,
            Self::Frame { code, .. } => *code,
        }
    }

    /// Human-readable close reason.
    #[must_use]
    pub fn reason(&self) -> String { self.to_string() }

    /// Stable category label, used for metrics and logging.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::UnexpectedContinuation
            | Self::ExpectedContinuation
            | Self::InvalidOpcode(_)
            | Self::ClosePayloadTooSmall => "protocol",
            Self::MessageTooLarge { .. } => "resource",
            Self::InvalidUtf8 => "encoding",
            Self::Timeout => "liveness",
            Self::Frame { .. } => "frame",
        }
    }
}
