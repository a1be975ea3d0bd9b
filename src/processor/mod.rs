//! Reassembly of WebSocket frames into messages.
//!
//! [`DataProcessor`] pulls frames from a [`FrameReader`], enforces the
//! fragmentation rules of RFC 6455, decodes text incrementally, bounds the
//! size of reassembled messages and reports everything it observes as
//! [`ProcessorEvent`] values.
//!
//! ## Message state
//!
//! A message is either idle or in progress. The first non-final text or
//! binary frame starts a message and locks its opcode; continuation frames
//! extend it and the final frame completes it. Control frames may arrive
//! between fragments and leave the message untouched. Any error discards the
//! message and returns the processor to idle.
//!
//! ## Waiting for data
//!
//! When the reader needs more bytes, [`DataProcessor::process`] returns
//! `false` and arms a deadline. If the next call does not happen before the
//! deadline, the owner reports it through
//! [`DataProcessor::check_timeout_at`] or [`DataProcessor::timeout_elapsed`]
//! and the processor emits [`ProcessorError::Timeout`].

mod config;
mod control;
pub mod error;
pub mod event;
mod message;
mod utf8;

use std::time::{Duration, Instant};

use bytes::BytesMut;

pub use config::ProcessorConfig;
pub use control::parse_close_payload;
pub use error::ProcessorError;
pub use event::{EventSink, ProcessorEvent};
use message::PartialMessage;
pub use utf8::Utf8Decoder;

use crate::{
    frame::{Frame, FrameReader},
    metrics::{self, FrameKind, MessageKind},
    protocol::{MAX_FRAME_SIZE, MAX_MESSAGE_SIZE, OpCode},
};

/// Outcome of handling one frame inside the read loop.
enum Step {
    /// The frame continued a fragmented message; read the next one.
    Continue,
    /// The frame concluded this call's unit of work.
    Done,
}

/// Drives a [`FrameReader`] and turns its frames into [`ProcessorEvent`]s.
///
/// The processor is single-threaded and reactive: it only does work inside
/// [`process`](Self::process) and the timeout methods. It owns the message
/// in progress; the input buffer is borrowed for one call.
///
/// # Examples
///
/// ```
/// use bytes::BytesMut;
/// use wsproc::{
///     frame::{Frame, FrameReader},
///     processor::{DataProcessor, ProcessorEvent},
/// };
///
/// /// Reader handing out frames queued in advance.
/// struct Queued(Vec<Frame>);
///
/// impl FrameReader for Queued {
///     fn read_frame(&mut self, _src: &mut BytesMut) -> Option<Frame> {
///         (!self.0.is_empty()).then(|| self.0.remove(0))
///     }
///
///     fn max_allowed_frame_size(&self) -> u64 { u64::MAX }
///
///     fn set_max_allowed_frame_size(&mut self, _size: u64) {}
/// }
///
/// let mut processor = DataProcessor::new(Queued(vec![
///     Frame::text("hel", false),
///     Frame::continuation("lo", true),
/// ]));
/// let mut events = Vec::new();
/// assert!(processor.process(&mut BytesMut::new(), &mut events));
/// assert_eq!(events.last(), Some(&ProcessorEvent::TextMessage("hello".into())));
/// ```
#[derive(Debug)]
pub struct DataProcessor<R> {
    reader: R,
    config: ProcessorConfig,
    message: Option<PartialMessage>,
    wait_deadline: Option<Instant>,
}

impl<R: FrameReader> DataProcessor<R> {
    /// Create a processor with the default configuration.
    #[must_use]
    pub fn new(reader: R) -> Self { Self::with_config(reader, ProcessorConfig::default()) }

    /// Create a processor with `config`, handing its frame size cap to
    /// `reader`.
    #[must_use]
    pub fn with_config(mut reader: R, config: ProcessorConfig) -> Self {
        reader.set_max_allowed_frame_size(config.max_allowed_frame_size());
        Self {
            reader,
            config,
            message: None,
            wait_deadline: None,
        }
    }

    /// Largest frame size any configuration may allow.
    #[must_use]
    pub const fn max_frame_size() -> u64 { MAX_FRAME_SIZE }

    /// Largest message size any configuration may allow.
    #[must_use]
    pub const fn max_message_size() -> u64 { MAX_MESSAGE_SIZE }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ProcessorConfig { &self.config }

    /// Borrow the frame reader.
    #[must_use]
    pub fn reader(&self) -> &R { &self.reader }

    /// Mutably borrow the frame reader.
    pub fn reader_mut(&mut self) -> &mut R { &mut self.reader }

    /// Frame size cap currently delegated to the reader.
    #[must_use]
    pub fn max_allowed_frame_size(&self) -> u64 { self.reader.max_allowed_frame_size() }

    /// Change the frame size cap. Values above [`MAX_FRAME_SIZE`] are
    /// ignored.
    pub fn set_max_allowed_frame_size(&mut self, size: u64) {
        if self.config.set_max_allowed_frame_size(size) {
            self.reader.set_max_allowed_frame_size(size);
        }
    }

    /// Message size cap.
    #[must_use]
    pub fn max_allowed_message_size(&self) -> u64 { self.config.max_allowed_message_size() }

    /// Change the message size cap. Values above [`MAX_MESSAGE_SIZE`] are
    /// ignored.
    pub fn set_max_allowed_message_size(&mut self, size: u64) {
        self.config.set_max_allowed_message_size(size);
    }

    /// Inactivity timeout applied while a started frame is incomplete.
    #[must_use]
    pub fn wait_timeout(&self) -> Duration { self.config.wait_timeout() }

    /// Change the inactivity timeout. An armed deadline keeps its original
    /// expiry.
    pub fn set_wait_timeout(&mut self, timeout: Duration) {
        self.config = self.config.with_wait_timeout(timeout);
    }

    /// Whether a fragmented message is in progress.
    #[must_use]
    pub fn is_fragmented(&self) -> bool { self.message.is_some() }

    /// Opcode of the message in progress.
    #[must_use]
    pub fn message_opcode(&self) -> Option<OpCode> { self.message.as_ref().map(PartialMessage::opcode) }

    /// Raw payload bytes buffered for the message in progress.
    #[must_use]
    pub fn buffered_len(&self) -> u64 { self.message.as_ref().map_or(0, PartialMessage::received) }

    /// Deadline for the rest of an incomplete frame, if one is armed.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> { self.wait_deadline }

    /// Whether the processor is waiting for the rest of a frame.
    #[must_use]
    pub fn is_waiting(&self) -> bool { self.wait_deadline.is_some() }

    /// Disarm the inactivity deadline, typically because new data arrived.
    pub fn cancel_wait(&mut self) { self.wait_deadline = None; }

    /// Process frames available in `src` using the current time.
    ///
    /// Returns `true` once a frame has been consumed and handled: a control
    /// frame, the final frame of a message, or a frame that caused an error.
    /// Non-final data frames do not end the call; the next frame is read
    /// immediately. Returns `false` when the reader needs more bytes, after
    /// arming the inactivity deadline.
    pub fn process<S: EventSink + ?Sized>(&mut self, src: &mut BytesMut, sink: &mut S) -> bool {
        self.process_at(src, Instant::now(), sink)
    }

    /// Process frames available in `src` using an explicit clock reading.
    ///
    /// Accepting `now` keeps deadline arithmetic deterministic in tests and
    /// lets event loops use their own clock.
    pub fn process_at<S: EventSink + ?Sized>(
        &mut self,
        src: &mut BytesMut,
        now: Instant,
        sink: &mut S,
    ) -> bool {
        self.cancel_wait();
        loop {
            let Some(frame) = self.reader.read_frame(src) else {
                self.wait_deadline = now.checked_add(self.config.wait_timeout());
                return false;
            };
            match self.handle_frame(frame, sink) {
                Ok(Step::Continue) => {}
                Ok(Step::Done) => return true,
                Err(error) => {
                    self.fail(error, sink);
                    return true;
                }
            }
        }
    }

    /// Fire the inactivity timeout if its deadline has passed by `now`.
    ///
    /// On firing, the unread bytes in `src` are discarded together with the
    /// rest of the state. Returns whether the timeout fired.
    pub fn check_timeout_at<S: EventSink + ?Sized>(
        &mut self,
        src: &mut BytesMut,
        now: Instant,
        sink: &mut S,
    ) -> bool {
        match self.wait_deadline {
            Some(deadline) if now >= deadline => {
                self.timeout_elapsed(src, sink);
                true
            }
            _ => false,
        }
    }

    /// Report that the rest of a frame did not arrive in time.
    ///
    /// Resets all state, drops the partial frame left in `src` and emits
    /// [`ProcessorError::Timeout`]. The next call starts from a clean frame
    /// boundary.
    pub fn timeout_elapsed<S: EventSink + ?Sized>(&mut self, src: &mut BytesMut, sink: &mut S) {
        log::warn!(
            "no data for {:?} while reading a frame; dropping message state and {} buffered bytes",
            self.config.wait_timeout(),
            src.len()
        );
        src.clear();
        self.fail(ProcessorError::Timeout, sink);
    }

    /// Discard the message in progress, the armed deadline and any partial
    /// frame held by the reader.
    ///
    /// Bytes the reader left in the caller's buffer are not touched; callers
    /// resynchronising a stream clear that buffer themselves.
    pub fn clear(&mut self) {
        self.message = None;
        self.wait_deadline = None;
        self.reader.reset();
    }

    fn handle_frame<S: EventSink + ?Sized>(
        &mut self,
        frame: Frame,
        sink: &mut S,
    ) -> Result<Step, ProcessorError> {
        if let Some((code, reason)) = frame.diagnosis() {
            metrics::inc_frames(FrameKind::Invalid);
            return Err(ProcessorError::Frame {
                code,
                reason: reason.to_owned(),
            });
        }
        if frame.is_control_frame() {
            metrics::inc_frames(FrameKind::Control);
            if let Some(event) = control::control_event(frame)? {
                sink.emit(event);
            }
            return Ok(Step::Done);
        }
        metrics::inc_frames(FrameKind::Data);
        self.handle_data_frame(frame, sink)
    }

    fn handle_data_frame<S: EventSink + ?Sized>(
        &mut self,
        frame: Frame,
        sink: &mut S,
    ) -> Result<Step, ProcessorError> {
        let mut message = match (self.message.take(), frame.is_continuation_frame()) {
            (None, true) => return Err(ProcessorError::UnexpectedContinuation),
            (Some(_), false) => return Err(ProcessorError::ExpectedContinuation),
            (Some(message), true) => message,
            (None, false) => PartialMessage::start(frame.opcode())?,
        };
        message.check_size_limit(frame.payload().len(), self.config.max_allowed_message_size())?;

        let is_last = frame.is_final();
        let payload = frame.into_payload();
        if message.opcode() == OpCode::Text {
            let text = message.push_text(&payload, is_last)?;
            sink.emit(ProcessorEvent::TextFrame { text, is_last });
        } else {
            message.push_binary(&payload);
            sink.emit(ProcessorEvent::BinaryFrame { payload, is_last });
        }

        if !is_last {
            self.message = Some(message);
            return Ok(Step::Continue);
        }
        metrics::inc_messages(if message.opcode() == OpCode::Text {
            MessageKind::Text
        } else {
            MessageKind::Binary
        });
        sink.emit(message.finish());
        Ok(Step::Done)
    }

    fn fail<S: EventSink + ?Sized>(&mut self, error: ProcessorError, sink: &mut S) {
        log::debug!(
            "{} error (close code {}): {error}",
            error.error_type(),
            error.close_code()
        );
        metrics::inc_errors(error.error_type());
        self.clear();
        sink.emit(ProcessorEvent::Error(error));
    }
}
