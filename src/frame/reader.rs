//! The contract between a wire-level frame reader and the processor.

use bytes::BytesMut;

use super::Frame;

/// Source of [`Frame`] values parsed from a byte buffer.
///
/// Implementations own the bit-level parsing: header decoding, unmasking,
/// and enforcement of the per-frame size cap. Consumed bytes must be removed
/// from `src`; bytes of a frame that is not yet complete may either stay in
/// `src` or be buffered by the reader, mirroring
/// [`tokio_util::codec::Decoder`].
pub trait FrameReader {
    /// Attempt to read the next frame from `src`.
    ///
    /// Returns `None` when more bytes are needed. A malformed frame is not
    /// an error at this level: it is returned as [`Frame::invalid`] so the
    /// processor can report the reader's close code and reason.
    fn read_frame(&mut self, src: &mut BytesMut) -> Option<Frame>;

    /// Largest frame payload the reader currently accepts.
    fn max_allowed_frame_size(&self) -> u64;

    /// Change the largest frame payload the reader accepts.
    ///
    /// Callers clamp `size` to [`MAX_FRAME_SIZE`](crate::protocol::MAX_FRAME_SIZE)
    /// before delegating.
    fn set_max_allowed_frame_size(&mut self, size: u64);

    /// Discard any partially read frame.
    ///
    /// Called whenever the processor resets after an error. Readers that
    /// leave incomplete bytes in the caller's buffer need not override this.
    fn reset(&mut self) {}
}

impl<R: FrameReader + ?Sized> FrameReader for Box<R> {
    fn read_frame(&mut self, src: &mut BytesMut) -> Option<Frame> { (**self).read_frame(src) }

    fn max_allowed_frame_size(&self) -> u64 { (**self).max_allowed_frame_size() }

    fn set_max_allowed_frame_size(&mut self, size: u64) {
        (**self).set_max_allowed_frame_size(size);
    }

    fn reset(&mut self) { (**self).reset(); }
}
