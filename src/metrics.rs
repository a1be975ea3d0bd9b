//! Metric helpers for `wsproc`.
//!
//! This module defines metric names and simple helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. Without the `metrics` feature
//! the helpers compile to no-ops.

/// Name of the counter tracking frames read by the processor.
pub const FRAMES_PROCESSED: &str = "wsproc_frames_processed_total";
/// Name of the counter tracking completed messages.
pub const MESSAGES_RECEIVED: &str = "wsproc_messages_received_total";
/// Name of the counter tracking errors reported by the processor.
pub const ERRORS_TOTAL: &str = "wsproc_errors_total";

/// Classification of a frame handed to the processor.
#[derive(Clone, Copy, Debug)]
pub enum FrameKind {
    /// Text, binary or continuation frame.
    Data,
    /// Ping, pong, close or reserved control frame.
    Control,
    /// Frame the reader rejected.
    Invalid,
}

impl FrameKind {
    /// Label value used for the `kind` label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FrameKind::Data => "data",
            FrameKind::Control => "control",
            FrameKind::Invalid => "invalid",
        }
    }
}

/// Kind of a completed message.
#[derive(Clone, Copy, Debug)]
pub enum MessageKind {
    /// UTF-8 text message.
    Text,
    /// Binary message.
    Binary,
}

impl MessageKind {
    /// Label value used for the `kind` label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Binary => "binary",
        }
    }
}

/// Record a frame read by the processor.
#[cfg(feature = "metrics")]
pub fn inc_frames(kind: FrameKind) {
    metrics::counter!(FRAMES_PROCESSED, "kind" => kind.as_str()).increment(1);
}

/// Record a completed message.
#[cfg(feature = "metrics")]
pub fn inc_messages(kind: MessageKind) {
    metrics::counter!(MESSAGES_RECEIVED, "kind" => kind.as_str()).increment(1);
}

/// Record an error of the given category.
#[cfg(feature = "metrics")]
pub fn inc_errors(error_type: &'static str) {
    metrics::counter!(ERRORS_TOTAL, "type" => error_type).increment(1);
}

/// Record a frame read by the processor.
#[cfg(not(feature = "metrics"))]
pub fn inc_frames(_kind: FrameKind) {}

/// Record a completed message.
#[cfg(not(feature = "metrics"))]
pub fn inc_messages(_kind: MessageKind) {}

/// Record an error of the given category.
#[cfg(not(feature = "metrics"))]
pub fn inc_errors(_error_type: &'static str) {}
