//! Decoder configuration.
//!
//! All values are fixed at construction time. The struct derives serde so a
//! host can embed it in its own config file; loading that file is the host's
//! job.
//!
//! # Example
//!
//! ```
//! use delimframe::protocol::DecoderConfig;
//!
//! let config = DecoderConfig::default().with_max_length(256).with_delimiter(b'\n');
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DelimFrameError, Result};

/// Default maximum frame length in bytes, delimiter excluded.
pub const DEFAULT_MAX_LENGTH: usize = 1024;

/// Default frame delimiter.
pub const DEFAULT_DELIMITER: u8 = b'*';

/// Default initial accumulation buffer capacity.
pub const DEFAULT_INITIAL_CAPACITY: usize = 8 * 1024;

/// Construction parameters for [`DelimitedFrameDecoder`](super::DelimitedFrameDecoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Maximum number of bytes between two delimiters.
    pub max_length: usize,
    /// Byte that terminates each frame.
    pub delimiter: u8,
    /// Capacity reserved for the accumulation buffer up front.
    pub initial_capacity: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            delimiter: DEFAULT_DELIMITER,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl DecoderConfig {
    /// Set the maximum frame length.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Set the delimiter byte.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the initial buffer capacity.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Check that the configuration can drive a decoder.
    ///
    /// # Errors
    ///
    /// Returns [`DelimFrameError::InvalidConfig`] if `max_length` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(DelimFrameError::InvalidConfig(
                "max_length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
