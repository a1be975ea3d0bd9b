//! Close status codes (RFC 6455 section 7.4).

use std::fmt;

/// Status code carried by a close frame or reported alongside an error.
///
/// Peers may send any `u16`, so the type wraps the raw value and exposes the
/// registered codes as associated constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CloseCode(pub u16);

impl CloseCode {
    /// Normal closure.
    pub const NORMAL: Self = Self(1000);
    /// Endpoint is going away.
    pub const GOING_AWAY: Self = Self(1001);
    /// Protocol error.
    pub const PROTOCOL_ERROR: Self = Self(1002);
    /// Received data of a type the endpoint cannot accept.
    pub const UNSUPPORTED_DATA: Self = Self(1003);
    /// Reserved; never valid on the wire.
    pub const RESERVED_1004: Self = Self(1004);
    /// No status code was present; never valid on the wire.
    pub const MISSING_STATUS_CODE: Self = Self(1005);
    /// Connection dropped without a close frame; never valid on the wire.
    pub const ABNORMAL_DISCONNECTION: Self = Self(1006);
    /// Message data inconsistent with its type, such as invalid UTF-8.
    pub const WRONG_DATATYPE: Self = Self(1007);
    /// Policy violation.
    pub const POLICY_VIOLATED: Self = Self(1008);
    /// Message too big to process.
    pub const TOO_MUCH_DATA: Self = Self(1009);
    /// Client expected the server to negotiate an extension.
    pub const MISSING_EXTENSION: Self = Self(1010);
    /// Unexpected condition prevented the request from being fulfilled.
    pub const BAD_OPERATION: Self = Self(1011);
    /// TLS handshake failure; never valid on the wire.
    pub const TLS_HANDSHAKE_FAILED: Self = Self(1015);

    /// Raw status value.
    #[must_use]
    pub const fn as_u16(self) -> u16 { self.0 }

    /// Whether a peer may legally send this code in a close frame.
    ///
    /// Accepts 1000-1003, 1007-1011 and the application ranges 3000-4999.
    ///
    /// # Examples
    ///
    /// ```
    /// use wsproc::protocol::CloseCode;
    ///
    /// assert!(CloseCode::NORMAL.is_valid());
    /// assert!(CloseCode(4000).is_valid());
    /// assert!(!CloseCode::MISSING_STATUS_CODE.is_valid());
    /// ```
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self.0, 1000..=1003 | 1007..=1011 | 3000..=4999)
    }
}

impl From<u16> for CloseCode {
    fn from(raw: u16) -> Self { Self(raw) }
}

impl From<CloseCode> for u16 {
    fn from(code: CloseCode) -> Self { code.0 }
}

impl fmt::Display for CloseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}
