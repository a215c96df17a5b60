//! XDR (External Data Representation) primitives for xdrsock.
//!
//! This crate holds the transport-free half of the codec: padding
//! arithmetic, an encode scratch buffer, a decode cursor, and the value
//! types (UUID, timestamp) that travel over the wire. All integers are
//! big-endian and every item occupies a multiple of 4 bytes.

mod decode;
mod encode;
mod error;
pub mod time;
pub mod uuid;

pub use decode::XdrDecoder;
pub use encode::XdrEncoder;
pub use error::{Error, Result};
pub use time::{timestamp_from_nanos, timestamp_to_nanos};
pub use uuid::Uuid;

/// XDR alignment unit in bytes.
pub const UNIT: usize = 4;

/// Number of zero bytes needed to pad `len` up to the next multiple of 4.
pub fn pad_len(len: usize) -> usize {
    (UNIT - (len % UNIT)) % UNIT
}

/// Length of a fixed-length opaque of `len` bytes on the wire.
pub fn padded_len(len: usize) -> usize {
    len + pad_len(len)
}

/// Convert a length or count to its u32 wire form.
///
/// Values that do not fit are rejected instead of truncated.
pub fn wire_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::LengthOverflow(len))
}
