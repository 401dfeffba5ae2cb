//! # delimframe
//!
//! Streaming decoder for byte streams framed by a single delimiter byte.
//!
//! Bytes arrive from a transport in arbitrary chunks; the decoder buffers
//! partial frames, emits each complete frame in order and bounds memory by
//! discarding frames longer than a configured maximum.
//!
//! ## Architecture
//!
//! - **Protocol** (sync): [`DelimitedFrameDecoder`] turns chunks into frames
//!   and oversize-frame reports. No I/O.
//! - **Transport** (async): [`FrameReader`] reads from any `AsyncRead` and
//!   forwards decoded events to a [`FrameSink`], which decides whether an
//!   oversize frame should close the connection.
//!
//! ## Example
//!
//! ```
//! use delimframe::DelimitedFrameDecoder;
//!
//! let mut decoder = DelimitedFrameDecoder::with_max_length(3).unwrap();
//!
//! let (frames, errors) = decoder.push(b"toolong*ok*").into_parts();
//!
//! assert_eq!(errors[0].observed_len(), 7);
//! assert_eq!(frames[0].payload(), b"ok");
//! ```

pub mod error;
pub mod protocol;
pub mod transport;

pub use error::{DelimFrameError, FrameTooLong, TooLongLength};
pub use protocol::{DecodeBatch, DecodeEvent, DecoderConfig, DelimitedFrameDecoder, Frame};
pub use transport::{FrameReader, FrameSink};
