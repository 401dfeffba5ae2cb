//! Downstream consumers of decoded frames.
//!
//! A sink receives frames and oversize-frame reports in stream order and
//! decides whether the connection should keep going. The decoder never makes
//! that call itself.

use tokio::sync::mpsc;

use crate::error::FrameTooLong;
use crate::protocol::Frame;

/// What the read loop should do after a sink callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Keep reading.
    Continue,
    /// Stop reading; the connection owner closes the transport.
    Close,
}

/// Receiver of decoded frames and oversize-frame reports.
pub trait FrameSink {
    /// Handle one decoded frame. Ownership moves to the sink.
    fn on_frame(&mut self, frame: Frame) -> Disposition;

    /// Handle an oversize frame report.
    ///
    /// Default: log and keep going.
    fn on_too_long(&mut self, err: &FrameTooLong) -> Disposition {
        tracing::warn!("Dropped oversize frame: {}", err);
        Disposition::Continue
    }
}

impl FrameSink for Vec<Frame> {
    fn on_frame(&mut self, frame: Frame) -> Disposition {
        self.push(frame);
        Disposition::Continue
    }
}

/// How [`ChannelSink`] reacts to an oversize frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooLongPolicy {
    /// Log and keep the connection.
    #[default]
    Continue,
    /// Close the connection on the first oversize frame.
    Close,
}

/// Sink that forwards frames to an unbounded mpsc channel.
///
/// Closes once the receiving side has been dropped.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Frame>,
    policy: TooLongPolicy,
}

impl ChannelSink {
    /// Create a sink and the receiver it feeds.
    pub fn new(policy: TooLongPolicy) -> (Self, mpsc::UnboundedReceiver<Frame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, policy }, rx)
    }

    /// Wrap an existing sender.
    pub fn from_sender(tx: mpsc::UnboundedSender<Frame>, policy: TooLongPolicy) -> Self {
        Self { tx, policy }
    }
}

impl FrameSink for ChannelSink {
    fn on_frame(&mut self, frame: Frame) -> Disposition {
        match self.tx.send(frame) {
            Ok(()) => Disposition::Continue,
            Err(_) => {
                tracing::debug!("Frame receiver dropped, closing");
                Disposition::Close
            }
        }
    }

    fn on_too_long(&mut self, err: &FrameTooLong) -> Disposition {
        match self.policy {
            TooLongPolicy::Continue => {
                tracing::warn!("Dropped oversize frame: {}", err);
                Disposition::Continue
            }
            TooLongPolicy::Close => {
                tracing::warn!("Oversize frame, closing connection: {}", err);
                Disposition::Close
            }
        }
    }
}
