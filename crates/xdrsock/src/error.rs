//! Error types for the wire codec.

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while sending or receiving XDR values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// XDR encoding/decoding error.
    #[error("XDR error: {0}")]
    Xdr(#[from] xdrsock_xdr::Error),

    /// I/O error from the underlying transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection closed before the requested bytes arrived.
    ///
    /// The stream position is lost; the connection cannot be reused.
    #[error("end of stream after {received} of {expected} bytes")]
    EndOfStream { expected: usize, received: usize },

    /// Peer sent a length or count above the configured maximum.
    #[error("{what} length {len} exceeds maximum {max}")]
    LengthLimitExceeded {
        what: &'static str,
        len: usize,
        max: usize,
    },
}
