//! Limits and timing used by the [`DataProcessor`](super::DataProcessor).

use std::time::Duration;

use crate::protocol::{DEFAULT_WAIT_TIMEOUT, MAX_FRAME_SIZE, MAX_MESSAGE_SIZE};

/// Settings that bound frame and message sizes and the inactivity timeout.
///
/// Size setters ignore values above the protocol ceilings
/// ([`MAX_FRAME_SIZE`], [`MAX_MESSAGE_SIZE`]) and keep the previous value.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use wsproc::processor::ProcessorConfig;
///
/// let config = ProcessorConfig::new()
///     .with_max_allowed_message_size(64 * 1024)
///     .with_wait_timeout(Duration::from_secs(1));
/// assert_eq!(config.max_allowed_message_size(), 64 * 1024);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessorConfig {
    max_allowed_frame_size: u64,
    max_allowed_message_size: u64,
    wait_timeout: Duration,
}

impl ProcessorConfig {
    /// Configuration accepting the largest supported frames and messages.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_allowed_frame_size: MAX_FRAME_SIZE,
            max_allowed_message_size: MAX_MESSAGE_SIZE,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    /// Set the frame size cap handed to the frame reader.
    #[must_use]
    pub fn with_max_allowed_frame_size(mut self, size: u64) -> Self {
        self.set_max_allowed_frame_size(size);
        self
    }

    /// Set the maximum reassembled message size.
    #[must_use]
    pub fn with_max_allowed_message_size(mut self, size: u64) -> Self {
        self.set_max_allowed_message_size(size);
        self
    }

    /// Set how long a started frame may wait for its remaining bytes.
    #[must_use]
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Update the frame size cap in place. Returns whether it was applied.
    pub fn set_max_allowed_frame_size(&mut self, size: u64) -> bool {
        if size > MAX_FRAME_SIZE {
            log::debug!("ignoring frame size cap {size} above {MAX_FRAME_SIZE}");
            return false;
        }
        self.max_allowed_frame_size = size;
        true
    }

    /// Update the message size cap in place. Returns whether it was applied.
    pub fn set_max_allowed_message_size(&mut self, size: u64) -> bool {
        if size > MAX_MESSAGE_SIZE {
            log::debug!("ignoring message size cap {size} above {MAX_MESSAGE_SIZE}");
            return false;
        }
        self.max_allowed_message_size = size;
        true
    }

    /// Frame size cap.
    #[must_use]
    pub const fn max_allowed_frame_size(&self) -> u64 { self.max_allowed_frame_size }

    /// Message size cap.
    #[must_use]
    pub const fn max_allowed_message_size(&self) -> u64 { self.max_allowed_message_size }

    /// Inactivity timeout while waiting on a started frame.
    #[must_use]
    pub const fn wait_timeout(&self) -> Duration { self.wait_timeout }
}

impl Default for ProcessorConfig {
    fn default() -> Self { Self::new() }
}
