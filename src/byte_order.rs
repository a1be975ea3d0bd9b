//! Network byte-order helpers for close payloads and length tags.
//!
//! Close frames carry their status code as a big-endian `u16`; keeping the
//! conversion here scopes the Clippy expectation to one place.

/// Serialise a close status code (or any `u16`) in network byte order.
///
/// # Examples
///
/// ```
/// use wsproc::byte_order::write_network_u16;
///
/// assert_eq!(write_network_u16(1000), [0x03, 0xE8]);
/// ```
#[must_use]
pub fn write_network_u16(value: u16) -> [u8; 2] {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    value.to_be_bytes()
}

/// Parse a network-order `u16`, such as the status code leading a close
/// frame payload.
///
/// # Examples
///
/// ```
/// use wsproc::byte_order::read_network_u16;
///
/// assert_eq!(read_network_u16([0x03, 0xE9]), 1001);
/// ```
#[must_use]
pub fn read_network_u16(bytes: [u8; 2]) -> u16 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    u16::from_be_bytes(bytes)
}

/// Split the leading network-order `u16` off a payload.
///
/// Returns `None` when fewer than two bytes are available.
#[must_use]
pub fn split_network_u16(payload: &[u8]) -> Option<(u16, &[u8])> {
    let (head, rest) = payload.split_first_chunk::<2>()?;
    Some((read_network_u16(*head), rest))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{read_network_u16, split_network_u16, write_network_u16};

    #[rstest]
    #[case(1000, [0x03, 0xE8])]
    #[case(1011, [0x03, 0xF3])]
    #[case(4999, [0x13, 0x87])]
    fn close_codes_use_network_order(#[case] code: u16, #[case] wire: [u8; 2]) {
        assert_eq!(write_network_u16(code), wire);
        assert_eq!(read_network_u16(wire), code);
    }

    #[test]
    fn split_returns_code_and_remainder() {
        let (code, rest) = split_network_u16(&[0x03, 0xE8, b'o', b'k']).expect("two bytes");
        assert_eq!(code, 1000);
        assert_eq!(rest, b"ok");
    }

    #[rstest]
    #[case(&[][..])]
    #[case(&[0x03][..])]
    fn split_needs_two_bytes(#[case] payload: &[u8]) {
        assert!(split_network_u16(payload).is_none());
    }
}
