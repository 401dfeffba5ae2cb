//! Read loop that feeds a transport into the decoder.
//!
//! # Example
//!
//! ```
//! use delimframe::transport::FrameReader;
//! use delimframe::protocol::Frame;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let input: &[u8] = b"one*two*";
//! let mut frames: Vec<Frame> = Vec::new();
//!
//! let summary = FrameReader::new(input).run(&mut frames).await.unwrap();
//!
//! assert_eq!(summary.frames, 2);
//! assert_eq!(frames[1].payload(), b"two");
//! # });
//! ```

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::sink::{Disposition, FrameSink};
use crate::error::{DelimFrameError, Result};
use crate::protocol::{DecodeBatch, DecodeEvent, DelimitedFrameDecoder};

/// Default size of a single transport read.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024;

/// Outcome of [`FrameReader::run`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames delivered to the sink.
    pub frames: usize,
    /// Oversize reports delivered to the sink.
    pub errors: usize,
    /// Bytes read from the transport.
    pub bytes_read: u64,
    /// Unterminated bytes left at end of stream.
    pub trailing: Option<Bytes>,
    /// Whether the sink asked to close.
    pub closed_by_sink: bool,
}

/// Per-connection read loop around a [`DelimitedFrameDecoder`].
pub struct FrameReader<R> {
    reader: R,
    decoder: DelimitedFrameDecoder,
    buf: Vec<u8>,
    bytes_read: u64,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Create a reader with a default decoder.
    pub fn new(reader: R) -> Self {
        Self::with_decoder(reader, DelimitedFrameDecoder::new())
    }

    /// Create a reader around a configured decoder.
    pub fn with_decoder(reader: R, decoder: DelimitedFrameDecoder) -> Self {
        Self {
            reader,
            decoder,
            buf: vec![0u8; DEFAULT_READ_BUFFER_SIZE],
            bytes_read: 0,
        }
    }

    /// Set the size of each transport read.
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.buf = vec![0u8; size.max(1)];
        self
    }

    /// The decoder driven by this reader.
    pub fn decoder(&self) -> &DelimitedFrameDecoder {
        &self.decoder
    }

    /// Total bytes read from the transport so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Read one chunk and decode it.
    ///
    /// Returns `Ok(None)` once the transport reaches end of stream.
    pub async fn read_batch(&mut self) -> Result<Option<DecodeBatch>> {
        let n = match self.reader.read(&mut self.buf).await {
            Ok(0) => return Ok(None),
            Ok(n) => n,
            Err(e) => {
                tracing::error!("Transport read error: {}", e);
                return Err(DelimFrameError::Io(e));
            }
        };

        self.bytes_read += n as u64;
        Ok(Some(self.decoder.push(&self.buf[..n])))
    }

    /// Drive the transport to end of stream, forwarding events to `sink`.
    ///
    /// Stops early when the sink returns [`Disposition::Close`]. Oversize
    /// frames only close the loop if the sink says so.
    pub async fn run<S: FrameSink>(mut self, sink: &mut S) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        while let Some(batch) = self.read_batch().await? {
            for event in batch {
                let disposition = match event {
                    DecodeEvent::Frame(frame) => {
                        summary.frames += 1;
                        sink.on_frame(frame)
                    }
                    DecodeEvent::TooLong(err) => {
                        summary.errors += 1;
                        sink.on_too_long(&err)
                    }
                };

                if disposition == Disposition::Close {
                    tracing::debug!(frames = summary.frames, "Sink closed the connection");
                    summary.bytes_read = self.bytes_read;
                    summary.closed_by_sink = true;
                    return Ok(summary);
                }
            }
        }

        summary.bytes_read = self.bytes_read;
        summary.trailing = self.decoder.finish();
        if let Some(trailing) = &summary.trailing {
            tracing::debug!(len = trailing.len(), "Stream ended inside a frame");
        }
        Ok(summary)
    }

    /// Give back the underlying transport.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
