//! Error types for binlist core.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in list operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] binlist_storage::StorageError),

    /// Record codec error.
    #[error("codec error: {0}")]
    Codec(#[from] binlist_codec::CodecError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Index outside the range accepted by the operation.
    ///
    /// Only returned when [`crate::Config::strict_indices`] is enabled;
    /// otherwise the rejection is logged and the call returns normally.
    #[error("{op}: index {index} out of range for list of {len}")]
    IndexOutOfRange {
        /// Operation that rejected the index.
        op: &'static str,
        /// Requested index.
        index: usize,
        /// List length at the time of the call.
        len: usize,
    },

    /// Operation needs at least one element.
    ///
    /// Only returned when [`crate::Config::strict_indices`] is enabled.
    #[error("{op}: list is empty")]
    EmptyList {
        /// Operation that was rejected.
        op: &'static str,
    },

    /// Header or link field holds a value no valid file can contain.
    #[error("invalid list format: {message}")]
    InvalidFormat {
        /// Description of the format issue.
        message: String,
    },

    /// Following `next` links ended before `count` records were visited.
    #[error("broken chain: reached end after {visited} of {count} records")]
    BrokenChain {
        /// Records visited before the sentinel was hit.
        visited: usize,
        /// Count recorded in the header.
        count: usize,
    },

    /// The file grew past the largest offset an `i32` link can hold.
    #[error("offset {offset} does not fit in a 32-bit link")]
    OffsetOverflow {
        /// End-of-file position that could not be linked.
        offset: u64,
    },
}

impl CoreError {
    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }
}
