//! Error types for XDR encoding/decoding.

/// Result type for XDR operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or decoding XDR values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Unexpected end of input.
    #[error("unexpected end of input")]
    Eof,

    /// A fixed-length opaque did not have its declared length.
    #[error("fixed opaque length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Length or count does not fit in a 32-bit unsigned integer.
    #[error("length {0} does not fit in an XDR unsigned int")]
    LengthOverflow(usize),

    /// UUID input was not exactly 16 bytes.
    #[error("invalid UUID length: {0} bytes")]
    InvalidUuidLength(usize),

    /// Nanosecond count cannot be represented as an instant.
    #[error("timestamp out of range: {0} ns")]
    TimestampOutOfRange(u64),

    /// Instant is too far in the future for a u64 nanosecond count.
    #[error("timestamp too large for nanosecond encoding: {0} s")]
    TimestampOverflow(i64),

    /// Instant lies before the Unix epoch.
    #[error("timestamp before the Unix epoch: {0} s")]
    NegativeTimestamp(i64),
}
