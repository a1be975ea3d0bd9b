//! Utilities for driving a [`DataProcessor`](wsproc::DataProcessor) over
//! in-memory streams during tests.
//!
//! The helpers write encoded frames into one half of a `tokio::io::duplex`
//! stream and run [`drive`](wsproc::drive) on the other, returning every
//! event the processor emitted for easy assertions.
//!
//! ```rust
//! use wsproc::{Frame, ProcessorEvent};
//! use wsproc_testing::drive_with_frames;
//!
//! # async fn example() {
//! let (_, events) = drive_with_frames(&[Frame::text("hi", true)]).await.unwrap();
//! assert_eq!(events.last(), Some(&ProcessorEvent::TextMessage("hi".into())));
//! # }
//! ```

pub mod helpers;
pub mod logging;

pub use helpers::{
    binary_messages,
    drive_chunks,
    drive_with_bytes,
    drive_with_frames,
    encode_frames,
    errors,
    processor,
    text_messages,
};
pub use logging::{LoggerHandle, logger};
