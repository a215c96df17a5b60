//! XDR encode buffer.

use bytes::{BufMut, BytesMut};

use crate::error::Result;
use crate::uuid::Uuid;
use crate::{pad_len, wire_len};

const PADDING: [u8; 3] = [0; 3];

/// Scratch buffer that accumulates XDR-encoded values.
///
/// The buffer is meant to be reused: call [`reset`](Self::reset) before
/// encoding the next logical value so nothing leaks between calls.
#[derive(Debug, Default)]
pub struct XdrEncoder {
    output: BytesMut,
}

impl XdrEncoder {
    /// Create a new, empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new encoder with a capacity hint.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: BytesMut::with_capacity(capacity),
        }
    }

    /// Discard any encoded bytes, keeping the allocation.
    pub fn reset(&mut self) {
        self.output.clear();
    }

    /// Encoded bytes so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.output
    }

    /// Number of encoded bytes.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    /// Whether nothing has been encoded since the last reset.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn put_u32(&mut self, v: u32) {
        self.output.put_u32(v);
    }

    /// Unsigned hyper: high 32-bit unit first, then the low unit.
    pub fn put_u64(&mut self, v: u64) {
        self.put_u32((v >> 32) as u32);
        self.put_u32(v as u32);
    }

    pub fn put_bool(&mut self, v: bool) {
        self.put_u32(u32::from(v));
    }

    /// Write zero padding for a payload of `len` bytes.
    pub fn put_padding(&mut self, len: usize) {
        self.output.put_slice(&PADDING[..pad_len(len)]);
    }

    /// Write fixed-length opaque data: raw bytes plus padding, no length prefix.
    pub fn put_fixed_opaque(&mut self, v: &[u8]) {
        self.output.reserve(v.len() + 3);
        self.output.put_slice(v);
        self.put_padding(v.len());
    }

    /// Write variable-length opaque data: u32 length, bytes, padding.
    pub fn put_opaque(&mut self, v: &[u8]) -> Result<()> {
        let len = wire_len(v.len())?;
        self.put_u32(len);
        self.put_fixed_opaque(v);
        Ok(())
    }

    pub fn put_uuid(&mut self, v: &Uuid) {
        self.put_fixed_opaque(v.as_bytes());
    }

    /// Write `len` copies of `byte` without padding.
    pub fn put_fill(&mut self, len: usize, byte: u8) {
        self.output.put_bytes(byte, len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(f: impl FnOnce(&mut XdrEncoder)) -> Vec<u8> {
        let mut enc = XdrEncoder::new();
        f(&mut enc);
        enc.as_bytes().to_vec()
    }

    #[test]
    fn test_encode_u32() {
        assert_eq!(encode(|e| e.put_u32(42)), vec![0, 0, 0, 42]);
        assert_eq!(encode(|e| e.put_u32(0xDEADBEEF)), vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_encode_u64_high_then_low() {
        assert_eq!(
            encode(|e| e.put_u64(0x0102030405060708)),
            vec![1, 2, 3, 4, 5, 6, 7, 8]
        );
        assert_eq!(encode(|e| e.put_u64(1 << 32)), vec![0, 0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_bool() {
        assert_eq!(encode(|e| e.put_bool(true)), vec![0, 0, 0, 1]);
        assert_eq!(encode(|e| e.put_bool(false)), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_fixed_opaque_padding() {
        assert_eq!(encode(|e| e.put_fixed_opaque(b"")), Vec::<u8>::new());
        assert_eq!(encode(|e| e.put_fixed_opaque(b"a")), vec![b'a', 0, 0, 0]);
        assert_eq!(encode(|e| e.put_fixed_opaque(b"abc")), vec![b'a', b'b', b'c', 0]);
        assert_eq!(encode(|e| e.put_fixed_opaque(b"abcd")), b"abcd".to_vec());
        assert_eq!(encode(|e| e.put_fixed_opaque(b"abcde")).len(), 8);
    }

    #[test]
    fn test_encode_opaque() {
        // "hi" -> length 2 + "hi" + 2 bytes padding
        assert_eq!(
            encode(|e| e.put_opaque(b"hi").unwrap()),
            vec![0, 0, 0, 2, b'h', b'i', 0, 0]
        );
        assert_eq!(encode(|e| e.put_opaque(b"").unwrap()), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_reset_discards_previous_value() {
        let mut enc = XdrEncoder::with_capacity(16);
        enc.put_u32(7);
        enc.reset();
        enc.put_bool(true);
        assert_eq!(enc.as_bytes(), &[0, 0, 0, 1]);
    }

    #[test]
    fn test_encode_fill() {
        let mut enc = XdrEncoder::new();
        enc.put_fill(5, 0xFF);
        enc.put_padding(5);
        assert_eq!(enc.as_bytes(), &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0]);
    }
}
