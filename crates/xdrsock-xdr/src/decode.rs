//! XDR decode cursor.

use crate::error::{Error, Result};
use crate::pad_len;
use crate::uuid::Uuid;

/// Cursor that decodes XDR values from a byte slice.
pub struct XdrDecoder<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> XdrDecoder<'a> {
    /// Create a new decoder positioned at the start of `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Get remaining bytes.
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read exactly `n` bytes.
    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::Eof);
        }
        let bytes = &self.input[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Skip padding bytes for 4-byte alignment. Their contents are not checked.
    fn skip_padding(&mut self, len: usize) -> Result<()> {
        let padding = pad_len(len);
        if padding > 0 {
            self.read_bytes(padding)?;
        }
        Ok(())
    }

    pub fn get_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Unsigned hyper, reassembled as `(high << 32) | low`.
    pub fn get_u64(&mut self) -> Result<u64> {
        let high = self.get_u32()? as u64;
        let low = self.get_u32()? as u64;
        Ok((high << 32) | low)
    }

    /// Any non-zero value decodes as `true`.
    pub fn get_bool(&mut self) -> Result<bool> {
        Ok(self.get_u32()? != 0)
    }

    /// Read fixed-length opaque data and skip its padding.
    pub fn get_fixed_opaque(&mut self, len: usize) -> Result<&'a [u8]> {
        let bytes = self.read_bytes(len)?;
        self.skip_padding(len)?;
        Ok(bytes)
    }

    /// Read variable-length opaque data.
    pub fn get_opaque(&mut self) -> Result<&'a [u8]> {
        let len = self.get_u32()? as usize;
        self.get_fixed_opaque(len)
    }

    pub fn get_uuid(&mut self) -> Result<Uuid> {
        Uuid::from_slice(self.get_fixed_opaque(Uuid::LEN)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_u32() {
        assert_eq!(XdrDecoder::new(&[0, 0, 0, 42]).get_u32().unwrap(), 42);
        assert_eq!(
            XdrDecoder::new(&[255, 255, 255, 255]).get_u32().unwrap(),
            0xFFFFFFFF
        );
    }

    #[test]
    fn test_decode_u64() {
        let mut de = XdrDecoder::new(&[0, 0, 0, 1, 0, 0, 0, 2]);
        assert_eq!(de.get_u64().unwrap(), (1 << 32) | 2);
        assert_eq!(de.remaining(), 0);
    }

    #[test]
    fn test_decode_bool_normalizes_non_zero() {
        assert!(!XdrDecoder::new(&[0, 0, 0, 0]).get_bool().unwrap());
        assert!(XdrDecoder::new(&[0, 0, 0, 1]).get_bool().unwrap());
        assert!(XdrDecoder::new(&[0, 0, 0, 2]).get_bool().unwrap());
        assert!(XdrDecoder::new(&[0x80, 0, 0, 0]).get_bool().unwrap());
    }

    #[test]
    fn test_decode_fixed_opaque_ignores_padding_contents() {
        let mut de = XdrDecoder::new(&[b'a', b'b', 0xAA, 0xBB, 0, 0, 0, 9]);
        assert_eq!(de.get_fixed_opaque(2).unwrap(), b"ab");
        assert_eq!(de.position(), 4);
        assert_eq!(de.get_u32().unwrap(), 9);
    }

    #[test]
    fn test_decode_opaque() {
        let mut de = XdrDecoder::new(&[0, 0, 0, 5, b'h', b'e', b'l', b'l', b'o', 0, 0, 0]);
        assert_eq!(de.get_opaque().unwrap(), b"hello");
        assert_eq!(de.remaining(), 0);
    }

    #[test]
    fn test_decode_eof() {
        assert_eq!(XdrDecoder::new(&[0, 0, 0]).get_u32(), Err(Error::Eof));
        // Payload present but padding missing.
        assert_eq!(
            XdrDecoder::new(&[b'a', b'b', b'c']).get_fixed_opaque(3),
            Err(Error::Eof)
        );
        // Length prefix claims more than is available.
        assert_eq!(
            XdrDecoder::new(&[0, 0, 0, 8, 1, 2, 3, 4]).get_opaque(),
            Err(Error::Eof)
        );
    }

    #[test]
    fn test_roundtrip_with_encoder() {
        use crate::XdrEncoder;

        let uuid = Uuid::from_u128(0x0011_2233_4455_6677_8899_aabb_ccdd_eeff);
        let mut enc = XdrEncoder::new();
        enc.put_u32(7);
        enc.put_u64(u64::MAX);
        enc.put_bool(true);
        enc.put_opaque(b"xdr").unwrap();
        enc.put_uuid(&uuid);

        let mut de = XdrDecoder::new(enc.as_bytes());
        assert_eq!(de.get_u32().unwrap(), 7);
        assert_eq!(de.get_u64().unwrap(), u64::MAX);
        assert!(de.get_bool().unwrap());
        assert_eq!(de.get_opaque().unwrap(), b"xdr");
        assert_eq!(de.get_uuid().unwrap(), uuid);
        assert_eq!(de.remaining(), 0);
    }
}
