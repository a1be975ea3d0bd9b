//! Length-tagged frame layout used by byte-level tests.
//!
//! Each frame is `[flags: u8][opcode: u8][length: u32 BE][payload]`, where
//! flag `0x80` is the FIN bit. The reader enforces the same per-frame rules a
//! real reader would: the configured size cap, unfragmented control frames
//! and the 125-byte control payload limit.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{
    frame::{Frame, FrameReader},
    protocol::{CloseCode, MAX_CONTROL_PAYLOAD, MAX_FRAME_SIZE, OpCode},
};

/// Size of the tagged frame header.
pub const TAGGED_HEADER_LEN: usize = 6;

const FIN: u8 = 0x80;

/// Reader for the length-tagged test layout.
#[derive(Clone, Copy, Debug)]
pub struct TaggedFrameReader {
    max_frame_size: u64,
}

impl TaggedFrameReader {
    /// Reader accepting frames up to [`MAX_FRAME_SIZE`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_frame_size: MAX_FRAME_SIZE,
        }
    }
}

impl Default for TaggedFrameReader {
    fn default() -> Self { Self::new() }
}

impl FrameReader for TaggedFrameReader {
    fn read_frame(&mut self, src: &mut BytesMut) -> Option<Frame> {
        if src.len() < TAGGED_HEADER_LEN {
            return None;
        }
        let mut header = &src[..TAGGED_HEADER_LEN];
        let flags = header.get_u8();
        let opcode = OpCode::from(header.get_u8());
        let declared = u64::from(header.get_u32());

        let payload_len = match usize::try_from(declared) {
            Ok(len) if declared <= self.max_frame_size => len,
            _ => {
                // The stream cannot be resynchronised past an oversized frame.
                src.clear();
                return Some(Frame::invalid(
                    CloseCode::TOO_MUCH_DATA,
                    "Maximum framesize exceeded.",
                ));
            }
        };
        if src.len() < TAGGED_HEADER_LEN + payload_len {
            return None;
        }
        src.advance(TAGGED_HEADER_LEN);
        let payload = src.split_to(payload_len).freeze();
        let is_final = flags & FIN == FIN;

        if opcode.is_control() && !is_final {
            return Some(Frame::invalid(
                CloseCode::PROTOCOL_ERROR,
                "Control frames cannot be fragmented.",
            ));
        }
        if opcode.is_control() && payload_len > MAX_CONTROL_PAYLOAD {
            return Some(Frame::invalid(
                CloseCode::PROTOCOL_ERROR,
                "Max control frame payload length is 125 bytes.",
            ));
        }
        Some(Frame::new(opcode, is_final, payload))
    }

    fn max_allowed_frame_size(&self) -> u64 { self.max_frame_size }

    fn set_max_allowed_frame_size(&mut self, size: u64) { self.max_frame_size = size; }
}

/// Encode a frame from its raw parts.
///
/// # Panics
///
/// Panics if `payload` is longer than `u32::MAX` bytes.
#[must_use]
pub fn encode_tagged_frame(opcode: u8, is_final: bool, payload: &[u8]) -> Bytes {
    let len = u32::try_from(payload.len()).expect("test payload fits in u32");
    let mut buf = BytesMut::with_capacity(TAGGED_HEADER_LEN + payload.len());
    buf.put_u8(if is_final { FIN } else { 0 });
    buf.put_u8(opcode);
    buf.put_u32(len);
    buf.put_slice(payload);
    buf.freeze()
}

/// Encode a [`Frame`] in the tagged layout.
#[must_use]
pub fn encode_test_frame(frame: &Frame) -> Bytes {
    encode_tagged_frame(frame.opcode().as_u8(), frame.is_final(), frame.payload())
}

#[cfg(test)]
mod tests {
    use bytes::{Bytes, BytesMut};
    use rstest::rstest;

    use super::{TAGGED_HEADER_LEN, TaggedFrameReader, encode_tagged_frame, encode_test_frame};
    use crate::{
        frame::{Frame, FrameReader},
        protocol::CloseCode,
    };

    #[test]
    fn reads_frames_back_to_back() {
        let mut src = BytesMut::new();
        src.extend_from_slice(&encode_test_frame(&Frame::text("ab", false)));
        src.extend_from_slice(&encode_test_frame(&Frame::continuation("cd", true)));
        let mut reader = TaggedFrameReader::new();

        assert_eq!(reader.read_frame(&mut src), Some(Frame::text("ab", false)));
        assert_eq!(
            reader.read_frame(&mut src),
            Some(Frame::continuation("cd", true))
        );
        assert!(src.is_empty());
        assert_eq!(reader.read_frame(&mut src), None);
    }

    #[test]
    fn leaves_partial_frame_in_buffer() {
        let encoded = encode_test_frame(&Frame::binary(vec![7_u8; 10], true));
        let mut src = BytesMut::from(&encoded[..TAGGED_HEADER_LEN + 4]);
        let mut reader = TaggedFrameReader::new();

        assert_eq!(reader.read_frame(&mut src), None);
        assert_eq!(src.len(), TAGGED_HEADER_LEN + 4);
        src.extend_from_slice(&encoded[TAGGED_HEADER_LEN + 4..]);
        assert_eq!(
            reader.read_frame(&mut src),
            Some(Frame::binary(Bytes::from(vec![7_u8; 10]), true))
        );
    }

    #[test]
    fn rejects_frames_above_cap() {
        let mut reader = TaggedFrameReader::new();
        reader.set_max_allowed_frame_size(4);
        let mut src = BytesMut::from(&encode_tagged_frame(0x2, true, b"12345")[..]);

        let frame = reader.read_frame(&mut src).expect("diagnosis");
        assert_eq!(
            frame.diagnosis(),
            Some((CloseCode::TOO_MUCH_DATA, "Maximum framesize exceeded."))
        );
        assert!(src.is_empty());
    }

    #[rstest]
    #[case::fragmented_ping(0x9, false, 0, "Control frames cannot be fragmented.")]
    #[case::large_close(0x8, true, 126, "Max control frame payload length is 125 bytes.")]
    fn rejects_malformed_control_frames(
        #[case] opcode: u8,
        #[case] is_final: bool,
        #[case] len: usize,
        #[case] reason: &str,
    ) {
        let mut src = BytesMut::from(&encode_tagged_frame(opcode, is_final, &vec![0; len])[..]);
        let frame = TaggedFrameReader::new()
            .read_frame(&mut src)
            .expect("diagnosis");
        assert_eq!(frame.diagnosis(), Some((CloseCode::PROTOCOL_ERROR, reason)));
    }
}
