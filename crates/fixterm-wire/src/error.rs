//! Wire-level error types.

use thiserror::Error;

/// Errors produced while encoding or decoding FIX frames.
#[derive(Debug, Error)]
pub enum WireError {
    /// Underlying transport I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A frame exceeded the configured size limit.
    #[error("frame too long: {actual} bytes (limit {limit})")]
    FrameTooLong {
        /// Observed frame length in bytes.
        actual: usize,
        /// Configured maximum frame length.
        limit: usize,
    },

    /// The byte stream does not form a valid FIX frame.
    #[error("malformed frame: {0}")]
    Malformed(String),

    /// A required field was absent from a message.
    #[error("missing required field: tag {0}")]
    MissingField(u32),

    /// A field could not be parsed as `tag=value`.
    #[error("invalid field: {0}")]
    BadField(String),

    /// BodyLength(9) did not point at the CheckSum trailer.
    #[error("BodyLength {declared} does not match frame contents")]
    BodyLength {
        /// The value carried in tag 9.
        declared: usize,
    },

    /// CheckSum(10) did not match the computed value.
    #[error("CheckSum mismatch: declared {declared:03}, computed {computed:03}")]
    CheckSum {
        /// The value carried in tag 10.
        declared: u32,
        /// The modulo-256 sum computed over the frame.
        computed: u32,
    },

    /// A BeginString / configuration version string was not recognized.
    #[error("unknown FIX version: {0}")]
    UnknownVersion(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WireError>;
