//! Reader replaying a fixed script of frames.

use std::collections::VecDeque;

use bytes::BytesMut;

use crate::{
    frame::{Frame, FrameReader},
    protocol::MAX_FRAME_SIZE,
};

/// Reader that yields queued results in order.
///
/// `None` entries in the script simulate "more bytes needed". Once the
/// script is exhausted every read reports an incomplete frame.
#[derive(Debug)]
pub struct ScriptedReader {
    script: VecDeque<Option<Frame>>,
    max_frame_size: u64,
    resets: usize,
}

impl ScriptedReader {
    /// Reader yielding `frames` back to back.
    #[must_use]
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self::from_script(frames.into_iter().map(Some))
    }

    /// Reader yielding an explicit script of reads.
    #[must_use]
    pub fn from_script(script: impl IntoIterator<Item = Option<Frame>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            max_frame_size: MAX_FRAME_SIZE,
            resets: 0,
        }
    }

    /// Append a frame to the script.
    pub fn push(&mut self, frame: Frame) { self.script.push_back(Some(frame)); }

    /// Append an "incomplete" read to the script.
    pub fn push_incomplete(&mut self) { self.script.push_back(None); }

    /// Number of scripted reads not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize { self.script.len() }

    /// How often the processor asked the reader to reset.
    #[must_use]
    pub fn resets(&self) -> usize { self.resets }
}

impl FrameReader for ScriptedReader {
    fn read_frame(&mut self, _src: &mut BytesMut) -> Option<Frame> { self.script.pop_front().flatten() }

    fn max_allowed_frame_size(&self) -> u64 { self.max_frame_size }

    fn set_max_allowed_frame_size(&mut self, size: u64) { self.max_frame_size = size; }

    fn reset(&mut self) { self.resets += 1; }
}
