//! Protocol module - delimiter framing, frame types and decoder config.
//!
//! This module implements the byte-level framing:
//! - Single-byte delimiter scanning over arbitrarily chunked input
//! - Decoder with bounded buffering and oversize-frame discard
//! - Frame struct with zero-copy payload

mod config;
mod decoder;
mod frame;

pub use config::{
    DecoderConfig, DEFAULT_DELIMITER, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_LENGTH,
};
pub use decoder::{DecodeBatch, DecodeEvent, DelimitedFrameDecoder};
pub use frame::{build_frame, build_frames, Frame};
