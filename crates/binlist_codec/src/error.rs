//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A fixed-width codec produced a body of the wrong size.
    #[error("fixed-width payload mismatch: expected {expected} bytes, got {actual}")]
    WidthMismatch {
        /// Width declared by the codec.
        expected: usize,
        /// Bytes actually produced.
        actual: usize,
    },

    /// A variable-width body does not fit the length prefix limit.
    #[error("payload too large: {len} bytes exceeds maximum of {max} bytes")]
    PayloadTooLarge {
        /// Body length.
        len: usize,
        /// Largest accepted body length.
        max: usize,
    },

    /// Unexpected end of input.
    #[error("unexpected end of input: needed {expected} bytes, got {actual}")]
    UnexpectedEof {
        /// Bytes needed.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },
}
