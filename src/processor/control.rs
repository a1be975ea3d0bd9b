//! Handling of ping, pong and close frames.
//!
//! Control frames are delivered as soon as they arrive, including between the
//! fragments of a data message, and never touch reassembly state.

use super::{ProcessorError, ProcessorEvent};
use crate::{
    byte_order::split_network_u16,
    frame::Frame,
    protocol::{CloseCode, OpCode},
};

/// Translate a validated control frame into the event it produces.
///
/// Reserved control opcodes (`0xB..=0xF`) yield `Ok(None)`. Callers only
/// pass frames whose opcode has the control bit set.
///
/// # Errors
///
/// Returns [`ProcessorError::ClosePayloadTooSmall`] for a one-byte close
/// payload and [`ProcessorError::InvalidOpcode`] for a raw opcode outside the
/// four-bit opcode space.
pub(super) fn control_event(frame: Frame) -> Result<Option<ProcessorEvent>, ProcessorError> {
    match frame.opcode() {
        OpCode::Ping => Ok(Some(ProcessorEvent::Ping(frame.into_payload()))),
        OpCode::Pong => Ok(Some(ProcessorEvent::Pong(frame.into_payload()))),
        OpCode::Close => {
            let (code, reason) = parse_close_payload(frame.payload())?;
            Ok(Some(ProcessorEvent::Close { code, reason }))
        }
        opcode if opcode.is_out_of_range() => Err(ProcessorError::InvalidOpcode(opcode.as_u8())),
        opcode => {
            log::debug!("ignoring frame with reserved control opcode {opcode}");
            Ok(None)
        }
    }
}

/// Parse the payload of a close frame into a status code and reason.
///
/// An empty payload means [`CloseCode::NORMAL`] with no reason. A code a peer
/// may not send is replaced by [`CloseCode::PROTOCOL_ERROR`], and a reason
/// that is not valid UTF-8 by [`CloseCode::WRONG_DATATYPE`]; in both cases
/// the reason describes the substitution.
///
/// # Errors
///
/// Returns [`ProcessorError::ClosePayloadTooSmall`] when the payload is a
/// single byte.
///
/// # Examples
///
/// ```
/// use wsproc::{processor::parse_close_payload, protocol::CloseCode};
///
/// let (code, reason) = parse_close_payload(&[0x03, 0xE9, b'b', b'y', b'e']).unwrap();
/// assert_eq!(code, CloseCode::GOING_AWAY);
/// assert_eq!(reason, "bye");
///
/// let (code, reason) = parse_close_payload(&[0x03, 0xEE]).unwrap();
/// assert_eq!(code, CloseCode::PROTOCOL_ERROR);
/// assert_eq!(reason, "Invalid close code 1006 detected.");
/// ```
pub fn parse_close_payload(payload: &[u8]) -> Result<(CloseCode, String), ProcessorError> {
    if payload.is_empty() {
        return Ok((CloseCode::NORMAL, String::new()));
    }
    let Some((raw, reason)) = split_network_u16(payload) else {
        return Err(ProcessorError::ClosePayloadTooSmall);
    };
    let code = CloseCode(raw);
    if !code.is_valid() {
        return Ok((
            CloseCode::PROTOCOL_ERROR,
            format!("Invalid close code {raw} detected."),
        ));
    }
    match std::str::from_utf8(reason) {
        Ok(reason) => Ok((code, reason.to_owned())),
        Err(_) => Ok((CloseCode::WRONG_DATATYPE, ProcessorError::InvalidUtf8.reason())),
    }
}
