//! Typed XDR values sent and received directly over a transport.
//!
//! Every operation is blocking and order-dependent: there are no type tags
//! or framing, so both peers must issue matching sequences of calls.

use std::io;

use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use xdrsock_xdr::{self as xdr, Uuid, XdrDecoder, XdrEncoder};

use crate::config::CodecConfig;
use crate::error::{Error, Result};
use crate::transport::Transport;

/// Elements reserved up front when decoding an array, whatever count the peer claims.
const PREALLOC_LIMIT: usize = 1024;

/// XDR codec bound to a single transport connection.
///
/// The codec owns two scratch buffers: an encoder that is reset before
/// each send and a receive buffer that is cleared before each read. Neither
/// carries state from one call to the next.
pub struct WireCodec<T> {
    transport: T,
    config: CodecConfig,
    encoder: XdrEncoder,
    read_buf: BytesMut,
}

impl<T: Transport> WireCodec<T> {
    /// Create a codec with the default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, CodecConfig::default())
    }

    /// Create a codec with an explicit configuration.
    pub fn with_config(transport: T, config: CodecConfig) -> Self {
        Self {
            transport,
            config,
            encoder: XdrEncoder::with_capacity(64),
            read_buf: BytesMut::with_capacity(64),
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Get a reference to the underlying transport.
    pub fn get_ref(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the underlying transport.
    ///
    /// Reading or writing through it directly will desynchronize the peers.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the codec, returning the transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Close the underlying transport.
    pub fn close(&mut self) -> Result<()> {
        self.transport.close()?;
        Ok(())
    }

    fn send_chunk_size(&self) -> usize {
        self.config
            .resolve_chunk_size(self.transport.send_buffer_size())
    }

    fn recv_chunk_size(&self) -> usize {
        self.config
            .resolve_chunk_size(self.transport.recv_buffer_size())
    }

    fn flush_encoder(&mut self) -> Result<()> {
        self.transport.send_all(self.encoder.as_bytes())?;
        Ok(())
    }

    /// Read exactly `n` bytes into the receive buffer, replacing its contents.
    ///
    /// Each read request is bounded by the receive chunk size, and the buffer
    /// only grows as bytes actually arrive.
    fn fill(&mut self, n: usize) -> Result<()> {
        self.read_buf.clear();
        let chunk = self.recv_chunk_size();
        while self.read_buf.len() < n {
            let start = self.read_buf.len();
            let want = (n - start).min(chunk);
            self.read_buf.resize(start + want, 0);

            match self.transport.recv(&mut self.read_buf[start..]) {
                Ok(0) => {
                    self.read_buf.truncate(start);
                    return Err(Error::EndOfStream {
                        expected: n,
                        received: start,
                    });
                }
                Ok(got) => self.read_buf.truncate(start + got),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    self.read_buf.truncate(start)
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Send opaque data with an optional length prefix.
    ///
    /// Payloads that fit in one send chunk go out in a single write together
    /// with the prefix and padding. Larger payloads are written chunk by chunk
    /// straight from `bytes`; the bytes on the wire are the same either way.
    fn send_opaque(&mut self, prefix: Option<u32>, bytes: &[u8]) -> Result<()> {
        let chunk = self.send_chunk_size();
        self.encoder.reset();
        if let Some(len) = prefix {
            self.encoder.put_u32(len);
        }
        if bytes.len() <= chunk {
            self.encoder.put_fixed_opaque(bytes);
            return self.flush_encoder();
        }

        if !self.encoder.is_empty() {
            self.flush_encoder()?;
        }
        log::trace!("sending {} byte opaque in {} byte chunks", bytes.len(), chunk);
        for piece in bytes.chunks(chunk) {
            self.transport.send_all(piece)?;
        }
        self.encoder.reset();
        self.encoder.put_padding(bytes.len());
        if !self.encoder.is_empty() {
            self.flush_encoder()?;
        }
        Ok(())
    }

    /// Receive exactly `n` raw bytes. No padding is consumed.
    pub fn receive(&mut self, n: usize) -> Result<Bytes> {
        self.fill(n)?;
        Ok(self.read_buf.split().freeze())
    }

    pub fn send_u32(&mut self, value: u32) -> Result<()> {
        self.encoder.reset();
        self.encoder.put_u32(value);
        self.flush_encoder()
    }

    /// Receive an unsigned int.
    ///
    /// 8 and 16 bit integers are padded to 32 bits on the wire, so they are
    /// also received with this function.
    pub fn receive_u32(&mut self) -> Result<u32> {
        self.fill(4)?;
        Ok(XdrDecoder::new(&self.read_buf).get_u32()?)
    }

    pub fn send_u64(&mut self, value: u64) -> Result<()> {
        self.encoder.reset();
        self.encoder.put_u64(value);
        self.flush_encoder()
    }

    /// Receive an unsigned hyper as two unsigned ints, high then low.
    pub fn receive_u64(&mut self) -> Result<u64> {
        let high = self.receive_u32()? as u64;
        let low = self.receive_u32()? as u64;
        Ok((high << 32) | low)
    }

    pub fn send_bool(&mut self, value: bool) -> Result<()> {
        self.encoder.reset();
        self.encoder.put_bool(value);
        self.flush_encoder()
    }

    /// Receive a boolean. Any non-zero value is `true`.
    pub fn receive_bool(&mut self) -> Result<bool> {
        Ok(self.receive_u32()? != 0)
    }

    /// Send fixed-length opaque data of exactly `length` bytes.
    ///
    /// The length is not transmitted. Nothing is written if `bytes` has a
    /// different length.
    pub fn send_fixed_string(&mut self, length: usize, bytes: &[u8]) -> Result<()> {
        if bytes.len() != length {
            return Err(xdr::Error::LengthMismatch {
                expected: length,
                actual: bytes.len(),
            }
            .into());
        }
        self.send_opaque(None, bytes)
    }

    /// Receive `length` bytes of fixed-length opaque data, discarding the padding.
    pub fn receive_fixed_string(&mut self, length: usize) -> Result<Bytes> {
        self.fill(xdr::padded_len(length))?;
        let mut data = self.read_buf.split().freeze();
        data.truncate(length);
        Ok(data)
    }

    /// Send variable-length opaque data: length prefix, bytes, padding.
    pub fn send_string(&mut self, bytes: &[u8]) -> Result<()> {
        let len = xdr::wire_len(bytes.len())?;
        self.send_opaque(Some(len), bytes)
    }

    /// Receive variable-length opaque data.
    ///
    /// The length prefix is checked against
    /// [`CodecConfig::max_string_len`] before any payload is read.
    pub fn receive_string(&mut self) -> Result<Bytes> {
        let len = self.receive_u32()? as usize;
        check_limit("string", len, self.config.max_string_len)?;
        self.receive_fixed_string(len)
    }

    pub fn send_uuid(&mut self, uuid: &Uuid) -> Result<()> {
        self.encoder.reset();
        self.encoder.put_uuid(uuid);
        self.flush_encoder()
    }

    pub fn receive_uuid(&mut self) -> Result<Uuid> {
        self.fill(Uuid::LEN)?;
        Ok(XdrDecoder::new(&self.read_buf).get_uuid()?)
    }

    /// Send a UTC instant as nanoseconds since the Unix epoch.
    pub fn send_timestamp(&mut self, ts: &DateTime<Utc>) -> Result<()> {
        let nanos = xdr::timestamp_to_nanos(ts)?;
        self.send_u64(nanos)
    }

    /// Receive nanoseconds since the Unix epoch as a UTC instant.
    pub fn receive_timestamp(&mut self) -> Result<DateTime<Utc>> {
        let nanos = self.receive_u64()?;
        Ok(xdr::timestamp_from_nanos(nanos)?)
    }

    /// Send a count followed by each element in order.
    ///
    /// ```ignore
    /// codec.send_array(&[1u32, 2, 3], |c, v| c.send_u32(*v))?;
    /// ```
    pub fn send_array<E, F>(&mut self, items: &[E], mut send: F) -> Result<()>
    where
        F: FnMut(&mut Self, &E) -> Result<()>,
    {
        let count = xdr::wire_len(items.len())?;
        self.send_u32(count)?;
        for item in items {
            send(self, item)?;
        }
        Ok(())
    }

    /// Receive a count, then that many elements.
    ///
    /// The count is checked against [`CodecConfig::max_array_len`] before
    /// any element is decoded.
    ///
    /// ```ignore
    /// let values: Vec<u32> = codec.receive_array(WireCodec::receive_u32)?;
    /// ```
    pub fn receive_array<E, F>(&mut self, receive: F) -> Result<Vec<E>>
    where
        F: FnMut(&mut Self) -> Result<E>,
    {
        let count = self.receive_u32()? as usize;
        check_limit("array", count, self.config.max_array_len)?;
        self.receive_array_n(count, receive)
    }

    /// Receive exactly `n` elements whose count is already known.
    pub fn receive_array_n<E, F>(&mut self, n: usize, mut receive: F) -> Result<Vec<E>>
    where
        F: FnMut(&mut Self) -> Result<E>,
    {
        let mut items = Vec::with_capacity(n.min(PREALLOC_LIMIT));
        for _ in 0..n {
            items.push(receive(self)?);
        }
        Ok(items)
    }

    /// Consume a fixed-length opaque of `n` bytes and its padding without
    /// keeping the payload. Returns `n`.
    pub fn skip_fixed_bytes(&mut self, n: usize) -> Result<usize> {
        let total = xdr::padded_len(n);
        let chunk = self.recv_chunk_size();
        let mut remaining = total;
        while remaining > 0 {
            let step = remaining.min(chunk);
            log::trace!("skipping {} bytes, {} remaining", step, remaining);
            match self.fill(step) {
                Ok(()) => remaining -= step,
                Err(Error::EndOfStream { received, .. }) => {
                    return Err(Error::EndOfStream {
                        expected: total,
                        received: total - remaining + received,
                    });
                }
                Err(e) => return Err(e),
            }
        }
        self.read_buf.clear();
        Ok(n)
    }

    /// Send a fixed-length opaque of `n` copies of `byte` plus padding,
    /// without building the whole payload in memory.
    pub fn send_fill_bytes(&mut self, n: usize, byte: u8) -> Result<()> {
        let chunk = self.send_chunk_size();
        self.encoder.reset();
        if n <= chunk {
            self.encoder.put_fill(n, byte);
            self.encoder.put_padding(n);
            return self.flush_encoder();
        }

        self.encoder.put_fill(chunk, byte);
        let mut remaining = n;
        while remaining > 0 {
            let step = remaining.min(chunk);
            log::trace!("sending {} fill bytes, {} remaining", step, remaining);
            self.transport.send_all(&self.encoder.as_bytes()[..step])?;
            remaining -= step;
        }
        self.encoder.reset();
        self.encoder.put_padding(n);
        if !self.encoder.is_empty() {
            self.flush_encoder()?;
        }
        Ok(())
    }
}

fn check_limit(what: &'static str, len: usize, max: usize) -> Result<()> {
    if len > max {
        log::debug!("rejecting {} length {} above limit {}", what, len, max);
        return Err(Error::LengthLimitExceeded { what, len, max });
    }
    Ok(())
}
