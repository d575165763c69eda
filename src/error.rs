//! Error types for tree decoding.

use thiserror::Error;

/// Errors raised while decoding a tree from a binary stream.
///
/// Decoding is the only fallible phase: once a [`RegTree`](crate::trees::RegTree)
/// exists, traversal cannot fail.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stream ended before the requested bytes were available.
    #[error("stream exhausted while reading {field} at byte offset {offset}")]
    ShortRead {
        /// Field being decoded when the stream ran out.
        field: &'static str,
        /// Byte offset of the failed read, relative to the reader's start.
        offset: u64,
    },

    /// The underlying reader failed for a reason other than end of stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A header count is negative and cannot size an array.
    #[error("header field {field} must be non-negative, got {value}")]
    NegativeCount {
        /// Header field holding the count.
        field: &'static str,
        /// Value as stored in the stream.
        value: i32,
    },
}

/// Convenience result alias for decoding.
pub type Result<T> = std::result::Result<T, DecodeError>;
