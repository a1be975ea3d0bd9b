//! Async driver feeding a byte stream into a [`DataProcessor`].
//!
//! [`drive`] owns the read loop: it buffers bytes from any [`AsyncRead`]
//! into a caller-owned buffer, hands them to the processor and enforces the
//! processor's inactivity timeout while a frame is only partly received. The
//! loop stops on end of stream, on timeout or when the shutdown token is
//! cancelled.

use std::{io, time::Duration};

use bytes::BytesMut;
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    select,
    time::timeout,
};
use tokio_util::sync::CancellationToken;

use crate::{
    frame::FrameReader,
    processor::{DataProcessor, EventSink},
};

/// Spare capacity reserved in the buffer before each read.
const READ_CHUNK: usize = 8 * 1024;

/// Why [`drive`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveEnd {
    /// The stream reported end of input.
    Eof,
    /// A started frame was not completed within the wait timeout. The
    /// processor has already emitted its timeout error.
    TimedOut,
    /// The shutdown token was cancelled.
    Cancelled,
}

/// Read from `io` and process frames until the stream ends, times out or
/// `shutdown` fires.
///
/// Events are delivered to `sink` as frames complete. Reads are unbounded
/// while the processor is idle between frames; once it reports an
/// incomplete frame the next read must finish within its wait timeout.
///
/// `buf` holds bytes read but not yet consumed. After
/// [`DriveEnd::Cancelled`] it keeps any partial frame, and the processor
/// keeps its fragment state, so calling `drive` again with the same buffer
/// and processor resumes the stream. On [`DriveEnd::TimedOut`] both have
/// already been reset.
///
/// # Errors
///
/// Returns any I/O error raised by `io`.
///
/// # Examples
///
/// ```
/// use bytes::BytesMut;
/// use tokio::io::AsyncWriteExt;
/// use tokio_util::sync::CancellationToken;
/// use wsproc::{
///     driver::{DriveEnd, drive},
///     frame::Frame,
///     processor::{DataProcessor, ProcessorEvent},
///     test_helpers::{TaggedFrameReader, encode_test_frame},
/// };
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> std::io::Result<()> {
/// let (mut client, mut server) = tokio::io::duplex(64);
/// client.write_all(&encode_test_frame(&Frame::text("hi", true))).await?;
/// drop(client);
///
/// let mut buf = BytesMut::new();
/// let mut processor = DataProcessor::new(TaggedFrameReader::new());
/// let mut events = Vec::new();
/// let shutdown = CancellationToken::new();
/// let end = drive(&mut server, &mut buf, &mut processor, &mut events, &shutdown).await?;
///
/// assert_eq!(end, DriveEnd::Eof);
/// assert_eq!(events.last(), Some(&ProcessorEvent::TextMessage("hi".into())));
/// # Ok(())
/// # }
/// ```
pub async fn drive<T, R, S>(
    io: &mut T,
    buf: &mut BytesMut,
    processor: &mut DataProcessor<R>,
    sink: &mut S,
    shutdown: &CancellationToken,
) -> io::Result<DriveEnd>
where
    T: AsyncRead + Unpin,
    R: FrameReader,
    S: EventSink + ?Sized,
{
    loop {
        while !buf.is_empty() && processor.process(buf, sink) {}

        let wait = processor.is_waiting().then(|| processor.wait_timeout());
        let buffered = buf.len();
        buf.reserve(READ_CHUNK);
        let read = select! {
            biased;

            () = shutdown.cancelled() => {
                tracing::debug!(
                    buffered,
                    fragmented = processor.is_fragmented(),
                    "shutdown requested; stopping frame processing"
                );
                return Ok(DriveEnd::Cancelled);
            }
            res = read_chunk(io, buf, wait) => res?,
        };

        match read {
            None => {
                tracing::warn!(timeout = ?wait, buffered = buf.len(), "frame incomplete after wait timeout");
                processor.timeout_elapsed(buf, sink);
                return Ok(DriveEnd::TimedOut);
            }
            Some(0) => {
                tracing::debug!(
                    buffered = buf.len(),
                    fragmented = processor.is_fragmented(),
                    "end of stream"
                );
                return Ok(DriveEnd::Eof);
            }
            Some(n) => tracing::trace!(bytes = n, buffered = buf.len(), "read from stream"),
        }
    }
}

/// Read once into `buf`, giving up after `wait` when set.
///
/// Returns `Ok(None)` on timeout.
async fn read_chunk<T>(io: &mut T, buf: &mut BytesMut, wait: Option<Duration>) -> io::Result<Option<usize>>
where
    T: AsyncRead + Unpin,
{
    match wait {
        Some(limit) => match timeout(limit, io.read_buf(buf)).await {
            Ok(res) => res.map(Some),
            Err(_) => Ok(None),
        },
        None => io.read_buf(buf).await.map(Some),
    }
}
