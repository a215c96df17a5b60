//! UUID as XDR fixed-length opaque data.
//!
//! On the wire a UUID is 16 raw bytes with no length prefix. Since 16 is
//! already 4-byte aligned there is never any padding.

use std::fmt;

use crate::error::{Error, Result};

/// A 128-bit UUID in its canonical big-endian byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Wire length in bytes.
    pub const LEN: usize = 16;

    /// The all-zero UUID.
    pub const NIL: Uuid = Uuid([0; 16]);

    /// Create a UUID from its 16 bytes.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Create a UUID from a 128-bit integer; the most significant byte comes first.
    pub const fn from_u128(v: u128) -> Self {
        Self(v.to_be_bytes())
    }

    /// Create a UUID from a slice that must be exactly 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 16] = bytes
            .try_into()
            .map_err(|_| Error::InvalidUuidLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Get the inner byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub const fn as_u128(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl From<u128> for Uuid {
    fn from(v: u128) -> Self {
        Self::from_u128(v)
    }
}

impl From<Uuid> for u128 {
    fn from(v: Uuid) -> Self {
        v.as_u128()
    }
}

/// Lowercase hex with dashes, 8-4-4-4-12.
impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                f.write_str("-")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}
