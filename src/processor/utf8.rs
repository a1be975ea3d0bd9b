//! Incremental UTF-8 decoding across frame boundaries.
//!
//! A code point may be split between two frames of the same text message.
//! [`Utf8Decoder`] holds the leading bytes of such a sequence until the next
//! frame supplies the rest.

use super::ProcessorError;

/// Longest UTF-8 encoding of a single code point.
const MAX_SEQUENCE_LEN: usize = 4;

/// Streaming UTF-8 decoder owned by the processor for one text message.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: [u8; MAX_SEQUENCE_LEN],
    pending_len: usize,
    failed: bool,
}

impl Utf8Decoder {
    /// Create a decoder with no carried state.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Decode the next chunk of a text message.
    ///
    /// Returns the text completed by `input`. Trailing bytes that begin a
    /// valid but unfinished sequence are carried into the next call.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::InvalidUtf8`] when `input`, together with any
    /// carried bytes, cannot be valid UTF-8. The decoder stays failed until
    /// [`reset`](Self::reset).
    pub fn decode(&mut self, input: &[u8]) -> Result<String, ProcessorError> {
        if self.failed {
            return Err(ProcessorError::InvalidUtf8);
        }
        let mut text = String::with_capacity(input.len() + self.pending_len);
        let rest = self.complete_pending(input, &mut text)?;
        match std::str::from_utf8(rest) {
            Ok(decoded) => text.push_str(decoded),
            Err(err) => {
                let (valid, tail) = rest.split_at(err.valid_up_to());
                if err.error_len().is_some() {
                    return Err(self.fail());
                }
                text.push_str(Self::checked(valid)?);
                self.pending[..tail.len()].copy_from_slice(tail);
                self.pending_len = tail.len();
            }
        }
        Ok(text)
    }

    /// Whether a started sequence is waiting for more bytes.
    #[must_use]
    pub fn is_incomplete(&self) -> bool { self.pending_len > 0 }

    /// Whether an invalid sequence has been seen.
    #[must_use]
    pub fn has_error(&self) -> bool { self.failed }

    /// Forget carried bytes and any error.
    pub fn reset(&mut self) { *self = Self::default(); }

    /// Feed bytes into the carried sequence until it completes, returning the
    /// unconsumed part of `input`.
    fn complete_pending<'a>(
        &mut self,
        mut input: &'a [u8],
        text: &mut String,
    ) -> Result<&'a [u8], ProcessorError> {
        while self.pending_len > 0 {
            let Some((&byte, rest)) = input.split_first() else {
                return Ok(input);
            };
            input = rest;
            self.pending[self.pending_len] = byte;
            self.pending_len += 1;
            match std::str::from_utf8(&self.pending[..self.pending_len]) {
                Ok(decoded) => {
                    text.push_str(decoded);
                    self.pending_len = 0;
                }
                Err(err) if err.error_len().is_none() && self.pending_len < MAX_SEQUENCE_LEN => {}
                Err(_) => return Err(self.fail()),
            }
        }
        Ok(input)
    }

    fn checked(valid: &[u8]) -> Result<&str, ProcessorError> {
        std::str::from_utf8(valid).map_err(|_| ProcessorError::InvalidUtf8)
    }

    fn fail(&mut self) -> ProcessorError {
        self.failed = true;
        self.pending_len = 0;
        ProcessorError::InvalidUtf8
    }
}
