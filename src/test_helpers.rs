#![cfg(any(test, feature = "test-helpers"))]
//! Frame readers for tests.
//!
//! [`ScriptedReader`] hands out a pre-arranged sequence of reader results and
//! ignores the byte buffer, which keeps processor tests focused on frame
//! semantics. [`TaggedFrameReader`] parses a trivial length-tagged layout so
//! byte-level drivers can be exercised without an RFC 6455 parser.

pub mod scripted;
pub mod tagged;

pub use scripted::ScriptedReader;
pub use tagged::{TAGGED_HEADER_LEN, TaggedFrameReader, encode_tagged_frame, encode_test_frame};
