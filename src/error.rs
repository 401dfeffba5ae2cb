//! Error types for delimframe.

use std::fmt;

use thiserror::Error;

/// How much of an oversize frame was observed when it was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooLongLength {
    /// The delimiter was found; this is the exact frame length.
    Exact(usize),
    /// No delimiter yet; this many bytes have been discarded so far.
    Discarded(usize),
}

impl TooLongLength {
    /// The byte count regardless of how it was observed.
    #[inline]
    pub fn get(&self) -> usize {
        match *self {
            TooLongLength::Exact(n) | TooLongLength::Discarded(n) => n,
        }
    }
}

impl fmt::Display for TooLongLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TooLongLength::Exact(n) => write!(f, "{}", n),
            TooLongLength::Discarded(n) => write!(f, "over {}", n),
        }
    }
}

/// A frame exceeded the configured maximum length and was dropped.
///
/// Purely informational: the decoder has already skipped the offending
/// bytes and keeps decoding. Whether the connection survives is up to
/// whoever receives this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("frame length ({length}) exceeds the allowed maximum ({max_length})")]
pub struct FrameTooLong {
    /// Observed length or running discard count.
    pub length: TooLongLength,
    /// Configured maximum frame length.
    pub max_length: usize,
}

impl FrameTooLong {
    /// The reported byte count.
    #[inline]
    pub fn observed_len(&self) -> usize {
        self.length.get()
    }

    /// True when the terminating delimiter has not been seen yet.
    #[inline]
    pub fn is_discard_pass(&self) -> bool {
        matches!(self.length, TooLongLength::Discarded(_))
    }
}

/// Main error type for all delimframe operations.
#[derive(Debug, Error)]
pub enum DelimFrameError {
    /// I/O error while reading from the transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Oversize frame, when surfaced as a hard error by a collaborator.
    #[error(transparent)]
    TooLong(#[from] FrameTooLong),

    /// Decoder configuration rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Payload contains the delimiter byte and cannot be framed.
    #[error("Payload contains delimiter byte 0x{delimiter:02x} at offset {offset}")]
    DelimiterInPayload { delimiter: u8, offset: usize },
}

/// Result type alias using DelimFrameError.
pub type Result<T> = std::result::Result<T, DelimFrameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_message() {
        let err = FrameTooLong {
            length: TooLongLength::Exact(7),
            max_length: 3,
        };
        assert_eq!(
            err.to_string(),
            "frame length (7) exceeds the allowed maximum (3)"
        );
        assert_eq!(err.observed_len(), 7);
        assert!(!err.is_discard_pass());
    }

    #[test]
    fn test_discarded_message() {
        let err = FrameTooLong {
            length: TooLongLength::Discarded(9),
            max_length: 3,
        };
        assert_eq!(
            err.to_string(),
            "frame length (over 9) exceeds the allowed maximum (3)"
        );
        assert!(err.is_discard_pass());
    }

    #[test]
    fn test_wraps_into_crate_error() {
        let err: DelimFrameError = FrameTooLong {
            length: TooLongLength::Exact(5),
            max_length: 4,
        }
        .into();
        assert!(matches!(err, DelimFrameError::TooLong(_)));
        assert!(err.to_string().contains("exceeds the allowed maximum (4)"));
    }
}
