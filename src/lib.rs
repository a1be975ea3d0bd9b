#![doc(html_root_url = "https://docs.rs/wsproc/latest")]
//! Public API for the `wsproc` library.
//!
//! This crate reassembles WebSocket (RFC 6455) frames into messages. A
//! [`FrameReader`] supplies parsed frames, [`DataProcessor`] applies the
//! fragmentation, size and UTF-8 rules and reports the outcome as
//! [`ProcessorEvent`]s, and [`drive`] runs the processor over any async byte
//! stream.

pub mod byte_order;
pub mod driver;
pub mod frame;
pub mod metrics;
pub mod processor;
pub mod protocol;
pub mod test_helpers;

pub use driver::{DriveEnd, drive};
pub use frame::{Frame, FrameReader};
pub use metrics::{ERRORS_TOTAL, FRAMES_PROCESSED, MESSAGES_RECEIVED};
pub use processor::{DataProcessor, EventSink, ProcessorConfig, ProcessorError, ProcessorEvent};
pub use protocol::{CloseCode, MAX_FRAME_SIZE, MAX_MESSAGE_SIZE, OpCode};
