//! Delimited frame decoder for accumulating partial reads.
//!
//! Uses `bytes::BytesMut` as the accumulation buffer: its front is the read
//! cursor and its length is the write cursor. Consumed prefixes are split
//! off, and `BytesMut` reclaims that space on the next reserve.
//!
//! Implements a two-state machine for oversize frames:
//! - `Normal`: scanning for the next delimiter
//! - `Discarding`: the current frame already exceeded `max_length`; drop
//!   everything up to and including its delimiter
//!
//! # Example
//!
//! ```
//! use delimframe::protocol::DelimitedFrameDecoder;
//!
//! let mut decoder = DelimitedFrameDecoder::with_max_length(5).unwrap();
//!
//! let first = decoder.push(b"hello*wor");
//! assert_eq!(first.frames().count(), 1);
//!
//! let (frames, errors) = decoder.push(b"ld*").into_parts();
//! assert_eq!(frames[0].payload(), b"world");
//! assert!(errors.is_empty());
//! ```

use bytes::{Buf, Bytes, BytesMut};

use super::config::DecoderConfig;
use super::Frame;
use crate::error::{FrameTooLong, Result, TooLongLength};

/// State machine for oversize frame handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Scanning for the next delimiter.
    Normal,
    /// Skipping an oversize frame; `discarded` bytes dropped so far.
    Discarding { discarded: usize },
}

/// One decoder output, in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    Frame(Frame),
    TooLong(FrameTooLong),
}

/// Everything one `push` produced.
///
/// Frames and errors are interleaved in the order their delimiters (or
/// discard passes) appeared in the stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeBatch {
    events: Vec<DecodeEvent>,
}

impl DecodeBatch {
    /// All events in stream order.
    pub fn events(&self) -> &[DecodeEvent] {
        &self.events
    }

    /// Decoded frames only.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.events.iter().filter_map(|event| match event {
            DecodeEvent::Frame(frame) => Some(frame),
            DecodeEvent::TooLong(_) => None,
        })
    }

    /// Oversize frame reports only.
    pub fn errors(&self) -> impl Iterator<Item = &FrameTooLong> {
        self.events.iter().filter_map(|event| match event {
            DecodeEvent::TooLong(err) => Some(err),
            DecodeEvent::Frame(_) => None,
        })
    }

    /// Split into frames and errors, each kept in order.
    pub fn into_parts(self) -> (Vec<Frame>, Vec<FrameTooLong>) {
        let mut frames = Vec::new();
        let mut errors = Vec::new();
        for event in self.events {
            match event {
                DecodeEvent::Frame(frame) => frames.push(frame),
                DecodeEvent::TooLong(err) => errors.push(err),
            }
        }
        (frames, errors)
    }

    /// Number of events in the batch.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when the push produced nothing.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl IntoIterator for DecodeBatch {
    type Item = DecodeEvent;
    type IntoIter = std::vec::IntoIter<DecodeEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

/// Buffer for accumulating incoming bytes and extracting delimited frames.
///
/// One instance per connection. Calls must be serialized, which `&mut self`
/// already enforces.
#[derive(Debug)]
pub struct DelimitedFrameDecoder {
    /// Unconsumed bytes from transport reads.
    buffer: BytesMut,
    /// Current oversize-handling state.
    state: State,
    /// Prefix of `buffer` already known to contain no delimiter.
    scanned: usize,
    max_length: usize,
    delimiter: u8,
}

impl DelimitedFrameDecoder {
    /// Create a decoder with default settings.
    ///
    /// Default max length: 1024 bytes, delimiter: `*`.
    pub fn new() -> Self {
        Self::from_valid_config(DecoderConfig::default())
    }

    /// Create a decoder with a custom max frame length.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_length` is zero.
    pub fn with_max_length(max_length: usize) -> Result<Self> {
        Self::with_config(DecoderConfig::default().with_max_length(max_length))
    }

    /// Create a decoder from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn with_config(config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: DecoderConfig) -> Self {
        Self {
            buffer: BytesMut::with_capacity(config.initial_capacity),
            state: State::Normal,
            scanned: 0,
            max_length: config.max_length,
            delimiter: config.delimiter,
        }
    }

    /// Push data into the buffer and extract everything now decodable.
    ///
    /// This is the main API for processing incoming data from the transport.
    /// A single chunk may complete zero, one or many frames; incomplete data
    /// is buffered internally for the next push. Oversize frames are reported
    /// in the returned batch and never stop decoding.
    pub fn push(&mut self, chunk: &[u8]) -> DecodeBatch {
        self.buffer.extend_from_slice(chunk);

        let mut batch = DecodeBatch::default();
        while let Some(event) = self.try_extract_one() {
            batch.events.push(event);
        }
        batch
    }

    /// Try to make one unit of progress.
    ///
    /// Returns `None` when more data is needed.
    fn try_extract_one(&mut self) -> Option<DecodeEvent> {
        let eol = self.find_delimiter();

        match (self.state, eol) {
            (State::Normal, Some(eol)) => {
                if eol > self.max_length {
                    self.buffer.advance(eol + 1);
                    return Some(self.too_long(TooLongLength::Exact(eol)));
                }

                let payload = self.buffer.split_to(eol).freeze();
                self.buffer.advance(1);
                Some(DecodeEvent::Frame(Frame::new(payload)))
            }

            (State::Normal, None) => {
                let length = self.buffer.len();
                if length <= self.max_length {
                    return None;
                }

                self.buffer.clear();
                self.scanned = 0;
                self.state = State::Discarding { discarded: length };
                tracing::debug!(
                    discarded = length,
                    max_length = self.max_length,
                    "Frame exceeds maximum length, discarding until next delimiter"
                );
                Some(self.too_long(TooLongLength::Discarded(length)))
            }

            (State::Discarding { discarded }, Some(eol)) => {
                let total = discarded.saturating_add(eol);
                self.buffer.advance(eol + 1);
                self.state = State::Normal;
                tracing::debug!(total, "Oversize frame terminated, resuming");
                Some(self.too_long(TooLongLength::Exact(total)))
            }

            (State::Discarding { discarded }, None) => {
                let length = self.buffer.len();
                if length == 0 {
                    return None;
                }

                let total = discarded.saturating_add(length);
                self.buffer.clear();
                self.scanned = 0;
                self.state = State::Discarding { discarded: total };
                tracing::trace!(total, "Discard pass");
                Some(self.too_long(TooLongLength::Discarded(total)))
            }
        }
    }

    /// Index of the first delimiter in the unconsumed region.
    ///
    /// Resumes after the prefix checked by earlier calls.
    fn find_delimiter(&mut self) -> Option<usize> {
        let delimiter = self.delimiter;
        match self.buffer[self.scanned..]
            .iter()
            .position(|&b| b == delimiter)
        {
            Some(offset) => {
                // Everything after the delimiter shifts once it is consumed.
                let eol = self.scanned + offset;
                self.scanned = 0;
                Some(eol)
            }
            None => {
                self.scanned = self.buffer.len();
                None
            }
        }
    }

    fn too_long(&self, length: TooLongLength) -> DecodeEvent {
        DecodeEvent::TooLong(FrameTooLong {
            length,
            max_length: self.max_length,
        })
    }

    /// Get the number of buffered, unconsumed bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Whether an oversize frame is currently being skipped.
    pub fn is_discarding(&self) -> bool {
        matches!(self.state, State::Discarding { .. })
    }

    /// Configured maximum frame length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Frame delimiter byte.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Clear the buffer and reset state.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state = State::Normal;
        self.scanned = 0;
    }

    /// Consume the decoder at end of stream.
    ///
    /// Returns the unterminated trailing bytes, if any. Bytes of a frame
    /// being discarded are never returned.
    pub fn finish(self) -> Option<Bytes> {
        if self.is_discarding() || self.buffer.is_empty() {
            return None;
        }
        Some(self.buffer.freeze())
    }

    /// Get the current state for debugging.
    #[cfg(test)]
    fn state_name(&self) -> &'static str {
        match &self.state {
            State::Normal => "Normal",
            State::Discarding { .. } => "Discarding",
        }
    }
}

impl Default for DelimitedFrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}
