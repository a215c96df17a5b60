//! In-memory transport implementation.

use std::io;

use bytes::{Buf, Bytes, BytesMut};

use super::Transport;

/// A transport backed by byte buffers instead of a socket.
///
/// Inbound bytes are scripted up front; outbound bytes are captured. Reads
/// can be capped to simulate a fragmenting network, and the reported
/// buffer sizes are configurable so chunked transfers can be exercised.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    incoming: Bytes,
    outgoing: BytesMut,
    max_read: Option<usize>,
    send_buffer_size: Option<usize>,
    recv_buffer_size: Option<usize>,
    writes: usize,
    largest_read_request: usize,
    closed: bool,
}

impl MemoryTransport {
    /// Create a transport with nothing to read.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport whose peer has sent `data` and then closed.
    pub fn with_incoming(data: impl Into<Bytes>) -> Self {
        Self {
            incoming: data.into(),
            ..Self::default()
        }
    }

    /// Return at most `max` bytes from each `recv` call.
    pub fn with_max_read(mut self, max: usize) -> Self {
        self.max_read = Some(max.max(1));
        self
    }

    /// Report the given socket buffer sizes.
    pub fn with_buffer_sizes(mut self, send: usize, recv: usize) -> Self {
        self.send_buffer_size = Some(send);
        self.recv_buffer_size = Some(recv);
        self
    }

    /// Bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.outgoing
    }

    /// Take the bytes written so far.
    pub fn take_written(&mut self) -> Bytes {
        self.outgoing.split().freeze()
    }

    /// Inbound bytes not yet received.
    pub fn unread(&self) -> usize {
        self.incoming.len()
    }

    /// Number of `send_all` calls issued.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Largest buffer ever passed to `recv`.
    pub fn largest_read_request(&self) -> usize {
        self.largest_read_request
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Transport for MemoryTransport {
    fn send_all(&mut self, data: &[u8]) -> io::Result<()> {
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "transport closed"));
        }
        self.writes += 1;
        self.outgoing.extend_from_slice(data);
        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.largest_read_request = self.largest_read_request.max(buf.len());
        if self.closed {
            return Ok(0);
        }
        let mut n = buf.len().min(self.incoming.len());
        if let Some(max) = self.max_read {
            n = n.min(max);
        }
        self.incoming.copy_to_slice(&mut buf[..n]);
        Ok(n)
    }

    fn send_buffer_size(&self) -> Option<usize> {
        self.send_buffer_size
    }

    fn recv_buffer_size(&self) -> Option<usize> {
        self.recv_buffer_size
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recv_respects_max_read() {
        let mut t = MemoryTransport::with_incoming(vec![1, 2, 3, 4, 5]).with_max_read(2);
        let mut buf = [0u8; 8];
        assert_eq!(t.recv(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[1, 2]);
        assert_eq!(t.recv(&mut buf).unwrap(), 2);
        assert_eq!(t.recv(&mut buf).unwrap(), 1);
        assert_eq!(t.recv(&mut buf).unwrap(), 0);
        assert_eq!(t.largest_read_request(), 8);
    }

    #[test]
    fn test_send_captures_output() {
        let mut t = MemoryTransport::new();
        t.send_all(b"ab").unwrap();
        t.send_all(b"cd").unwrap();
        assert_eq!(t.written(), b"abcd");
        assert_eq!(t.writes(), 2);
        assert_eq!(&t.take_written()[..], b"abcd");
        assert!(t.written().is_empty());
    }

    #[test]
    fn test_closed_transport() {
        let mut t = MemoryTransport::with_incoming(vec![1, 2, 3, 4]);
        t.close().unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(t.recv(&mut buf).unwrap(), 0);
        assert_eq!(
            t.send_all(b"x").unwrap_err().kind(),
            io::ErrorKind::BrokenPipe
        );
    }
}
