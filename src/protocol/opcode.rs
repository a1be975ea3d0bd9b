//! Frame opcodes.

use std::fmt;

/// Opcode carried in the low nibble of a frame's first byte.
///
/// Values without an RFC 6455 meaning are preserved as [`OpCode::Reserved`]
/// so the processor can report the raw value it rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpCode {
    /// Continuation of a fragmented message (`0x0`).
    Continue,
    /// First frame of a text message (`0x1`).
    Text,
    /// First frame of a binary message (`0x2`).
    Binary,
    /// Connection close (`0x8`).
    Close,
    /// Ping (`0x9`).
    Ping,
    /// Pong (`0xA`).
    Pong,
    /// Any other raw value.
    Reserved(u8),
}

impl OpCode {
    /// Raw wire value of this opcode.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Continue => 0x0,
            Self::Text => 0x1,
            Self::Binary => 0x2,
            Self::Close => 0x8,
            Self::Ping => 0x9,
            Self::Pong => 0xA,
            Self::Reserved(raw) => raw,
        }
    }

    /// Whether the opcode designates a control frame (bit `0x08` set).
    #[must_use]
    pub const fn is_control(self) -> bool { self.as_u8() & 0x08 == 0x08 }

    /// Whether the opcode designates a data frame.
    #[must_use]
    pub const fn is_data(self) -> bool { !self.is_control() }

    /// Whether the raw value is one of the reserved opcodes `0x3..=0x7` or
    /// `0xB..=0xF`.
    #[must_use]
    pub const fn is_reserved(self) -> bool { matches!(self.as_u8(), 0x3..=0x7 | 0xB..=0xF) }

    /// Whether the raw value lies outside the four-bit opcode space.
    #[must_use]
    pub const fn is_out_of_range(self) -> bool { self.as_u8() > 0x0F }
}

impl From<u8> for OpCode {
    fn from(raw: u8) -> Self {
        match raw {
            0x0 => Self::Continue,
            0x1 => Self::Text,
            0x2 => Self::Binary,
            0x8 => Self::Close,
            0x9 => Self::Ping,
            0xA => Self::Pong,
            other => Self::Reserved(other),
        }
    }
}

impl From<OpCode> for u8 {
    fn from(opcode: OpCode) -> Self { opcode.as_u8() }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => f.write_str("continuation"),
            Self::Text => f.write_str("text"),
            Self::Binary => f.write_str("binary"),
            Self::Close => f.write_str("close"),
            Self::Ping => f.write_str("ping"),
            Self::Pong => f.write_str("pong"),
            Self::Reserved(raw) => write!(f, "reserved({raw:#x})"),
        }
    }
}
