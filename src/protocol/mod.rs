//! RFC 6455 vocabulary shared by frame readers and the data processor.
//!
//! The module keeps opcodes, close status codes and protocol-wide size
//! ceilings in one place so readers and the processor agree on them.

pub mod close_code;
pub mod opcode;

use std::time::Duration;

pub use close_code::CloseCode;
pub use opcode::OpCode;

/// Largest frame payload this implementation will ever accept, in bytes.
///
/// Configured frame limits are clamped to this ceiling.
pub const MAX_FRAME_SIZE: u64 = i32::MAX as u64 - 1;

/// Largest reassembled message this implementation will ever accept, in
/// bytes.
pub const MAX_MESSAGE_SIZE: u64 = i32::MAX as u64 - 1;

/// Largest payload a control frame may carry.
pub const MAX_CONTROL_PAYLOAD: usize = 125;

/// How long a started frame may wait for its remaining bytes.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(5000);

#[cfg(test)]
mod tests;
