//! Helper utilities for driving a `DataProcessor` in tests.
//!
//! These functions feed encoded frames through an in-memory duplex stream
//! and collect the events the processor emits for assertions.

use bytes::{Bytes, BytesMut};
use rstest::fixture;
use tokio::io::{self, AsyncWriteExt, duplex};
use tokio_util::sync::CancellationToken;
use wsproc::{
    DataProcessor,
    DriveEnd,
    Frame,
    ProcessorError,
    ProcessorEvent,
    drive,
    test_helpers::{TaggedFrameReader, encode_test_frame},
};

const DEFAULT_CAPACITY: usize = 4096;

/// Create a processor reading the tagged test layout with default limits.
#[fixture]
#[allow(
    unused_braces,
    reason = "Clippy is wrong here; this is not a redundant block"
)]
pub fn processor() -> DataProcessor<TaggedFrameReader> { DataProcessor::new(TaggedFrameReader::new()) }

/// Concatenate the tagged encodings of `frames`.
#[must_use]
pub fn encode_frames(frames: &[Frame]) -> Vec<u8> {
    frames.iter().flat_map(encode_test_frame).collect()
}

/// Write `chunks` one at a time into a duplex stream, then close it, while
/// `processor` drives the other end.
///
/// Each chunk is flushed and followed by a yield so the driver observes the
/// chunk boundaries.
///
/// # Errors
///
/// Returns any I/O error raised while driving the processor.
pub async fn drive_chunks(
    processor: &mut DataProcessor<TaggedFrameReader>,
    chunks: Vec<Bytes>,
    capacity: usize,
) -> io::Result<(DriveEnd, Vec<ProcessorEvent>)> {
    let (mut client, mut server) = duplex(capacity);
    let writer = async move {
        for chunk in chunks {
            client.write_all(&chunk).await?;
            client.flush().await?;
            tokio::task::yield_now().await;
        }
        client.shutdown().await
    };
    let mut buf = BytesMut::new();
    let mut events = Vec::new();
    let shutdown = CancellationToken::new();
    let (written, end) = tokio::join!(
        writer,
        drive(&mut server, &mut buf, processor, &mut events, &shutdown)
    );
    written?;
    Ok((end?, events))
}

/// Drive a fresh processor over `bytes` until end of stream.
///
/// # Errors
///
/// Returns any I/O error raised while driving the processor.
pub async fn drive_with_bytes(bytes: impl Into<Bytes>) -> io::Result<(DriveEnd, Vec<ProcessorEvent>)> {
    let mut processor = DataProcessor::new(TaggedFrameReader::new());
    drive_chunks(&mut processor, vec![bytes.into()], DEFAULT_CAPACITY).await
}

/// Drive a fresh processor over the tagged encoding of `frames`.
///
/// # Errors
///
/// Returns any I/O error raised while driving the processor.
pub async fn drive_with_frames(frames: &[Frame]) -> io::Result<(DriveEnd, Vec<ProcessorEvent>)> {
    drive_with_bytes(encode_frames(frames)).await
}

/// Completed text messages in `events`, in order.
#[must_use]
pub fn text_messages(events: &[ProcessorEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|event| match event {
            ProcessorEvent::TextMessage(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Completed binary messages in `events`, in order.
#[must_use]
pub fn binary_messages(events: &[ProcessorEvent]) -> Vec<&Bytes> {
    events
        .iter()
        .filter_map(|event| match event {
            ProcessorEvent::BinaryMessage(payload) => Some(payload),
            _ => None,
        })
        .collect()
}

/// Errors reported in `events`, in order.
#[must_use]
pub fn errors(events: &[ProcessorEvent]) -> Vec<&ProcessorError> {
    events
        .iter()
        .filter_map(|event| match event {
            ProcessorEvent::Error(error) => Some(error),
            _ => None,
        })
        .collect()
}
