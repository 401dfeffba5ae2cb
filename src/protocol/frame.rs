//! Decoded frame type and the matching encoder helper.
//!
//! A frame is the payload between two delimiters. It owns its bytes via
//! `bytes::Bytes`, so handing it downstream is zero-copy and the decoder
//! keeps no reference to it.
//!
//! # Example
//!
//! ```
//! use delimframe::protocol::{build_frame, Frame};
//! use bytes::Bytes;
//!
//! let frame = Frame::new(Bytes::from_static(b"hello"));
//! assert_eq!(frame.payload(), b"hello");
//!
//! let wire = build_frame(b"hello", b'*').unwrap();
//! assert_eq!(wire, b"hello*");
//! ```

use std::ops::Deref;

use bytes::Bytes;

use crate::error::{DelimFrameError, Result};

/// A complete decoded frame, delimiter stripped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    payload: Bytes,
}

impl Frame {
    /// Create a frame from owned bytes.
    pub fn new(payload: Bytes) -> Self {
        Self { payload }
    }

    /// Create a frame from a slice (copies data).
    pub fn from_slice(payload: &[u8]) -> Self {
        Self {
            payload: Bytes::copy_from_slice(payload),
        }
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get a clone of the payload as Bytes (cheap, zero-copy).
    #[inline]
    pub fn payload_bytes(&self) -> Bytes {
        self.payload.clone()
    }

    /// Payload length.
    #[inline]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Zero-length frames are valid: two adjacent delimiters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Take the payload out of the frame.
    #[inline]
    pub fn into_bytes(self) -> Bytes {
        self.payload
    }
}

impl Deref for Frame {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.payload
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.payload
    }
}

impl From<Bytes> for Frame {
    fn from(payload: Bytes) -> Self {
        Self::new(payload)
    }
}

/// Encode a payload as one delimited frame.
///
/// # Errors
///
/// Returns [`DelimFrameError::DelimiterInPayload`] if the payload contains
/// the delimiter, since the receiving side would split it in two.
pub fn build_frame(payload: &[u8], delimiter: u8) -> Result<Vec<u8>> {
    if let Some(offset) = payload.iter().position(|&b| b == delimiter) {
        return Err(DelimFrameError::DelimiterInPayload { delimiter, offset });
    }

    let mut buf = Vec::with_capacity(payload.len() + 1);
    buf.extend_from_slice(payload);
    buf.push(delimiter);
    Ok(buf)
}

/// Encode several payloads back to back into one contiguous buffer.
pub fn build_frames<I, P>(payloads: I, delimiter: u8) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    let mut buf = Vec::new();
    for payload in payloads {
        buf.extend_from_slice(&build_frame(payload.as_ref(), delimiter)?);
    }
    Ok(buf)
}
