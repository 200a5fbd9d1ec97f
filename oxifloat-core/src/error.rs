//! Error types for OxiFloat operations.
//!
//! This module provides the error type covering every failure surfaced by
//! the codec: malformed or truncated streams, invalid quantization
//! parameters, and entropy stage failures.

use std::io;
use thiserror::Error;

/// The main error type for OxiFloat operations.
#[derive(Debug, Error)]
pub enum OxiFloatError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number in the stream header.
    #[error("Invalid magic number: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagic {
        /// Expected magic value.
        expected: u32,
        /// Actual magic value found.
        found: u32,
    },

    /// Input ended before the expected number of bytes could be read.
    #[error("Input too short: needed {needed} bytes, got {available}")]
    InputTooShort {
        /// Bytes required to continue.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// Structurally invalid data in a decoded stream.
    #[error("Corrupted stream at offset {offset}: {message}")]
    CorruptedStream {
        /// Offset (bytes into the framed stream, or a parameter index)
        /// where the corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// Quantization step is not a positive finite value.
    #[error("Invalid epsilon: {value} (must be positive and finite)")]
    InvalidEpsilon {
        /// The rejected quantization step.
        value: f32,
    },

    /// Compression was requested for an empty input.
    #[error("Empty input: at least one float is required")]
    EmptyInput,

    /// Input exceeds the number of floats the header can describe.
    #[error("Too many floats: {count} exceeds the 32-bit element count")]
    TooManyFloats {
        /// Number of floats in the rejected input.
        count: usize,
    },

    /// Entropy stage (init, streaming, or flush) failure.
    #[error("Entropy stage error: {message}")]
    Entropy {
        /// Description from the entropy backend.
        message: String,
    },
}

/// Result type alias for OxiFloat operations.
pub type Result<T> = std::result::Result<T, OxiFloatError>;

impl OxiFloatError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: u32, found: u32) -> Self {
        Self::InvalidMagic { expected, found }
    }

    /// Create an input too short error.
    pub fn input_too_short(needed: usize, available: usize) -> Self {
        Self::InputTooShort { needed, available }
    }

    /// Create a corrupted stream error.
    pub fn corrupted_stream(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptedStream {
            offset,
            message: message.into(),
        }
    }

    /// Create an entropy stage error.
    pub fn entropy(message: impl Into<String>) -> Self {
        Self::Entropy {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxiFloatError::invalid_magic(0xCA7D_D007, 0xFD2F_B528);
        assert!(err.to_string().contains("Invalid magic"));
        assert!(err.to_string().contains("0xca7dd007"));

        let err = OxiFloatError::input_too_short(12, 3);
        assert!(err.to_string().contains("needed 12"));

        let err = OxiFloatError::corrupted_stream(6144, "bit width above 32");
        assert!(err.to_string().contains("offset 6144"));

        let err = OxiFloatError::InvalidEpsilon { value: -1.0 };
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        let err: OxiFloatError = io_err.into();
        assert!(matches!(err, OxiFloatError::Io(_)));
    }
}
