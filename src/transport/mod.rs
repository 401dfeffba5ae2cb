//! Transport module - read loop and frame sinks.
//!
//! Provides the glue between an async byte source and the decoder:
//! - [`FrameReader`] - reads chunks and pushes them through the decoder
//! - [`FrameSink`] - receives frames and decides connection fate

mod reader;
mod sink;

pub use reader::{FrameReader, RunSummary, DEFAULT_READ_BUFFER_SIZE};
pub use sink::{ChannelSink, Disposition, FrameSink, TooLongPolicy};
