//! Transport layer for the wire codec.
//!
//! This module provides the byte-stream contract the codec consumes and
//! implementations for:
//! - TCP sockets
//! - Unix sockets
//! - an in-memory stream (for tests and offline encoding)

mod memory;
mod tcp;
#[cfg(unix)]
mod unix;

pub use memory::MemoryTransport;

use std::io;

/// Trait for blocking, reliable, ordered byte-stream connections.
pub trait Transport {
    /// Send every byte of `data`, retrying partial writes internally.
    fn send_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// Receive up to `buf.len()` bytes, blocking until some are available.
    ///
    /// Returns `Ok(0)` once the peer has closed the connection.
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Configured send buffer capacity, if the transport knows it.
    fn send_buffer_size(&self) -> Option<usize> {
        None
    }

    /// Configured receive buffer capacity, if the transport knows it.
    fn recv_buffer_size(&self) -> Option<usize> {
        None
    }

    /// Close the transport.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send_all(&mut self, data: &[u8]) -> io::Result<()> {
        (**self).send_all(data)
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).recv(buf)
    }

    fn send_buffer_size(&self) -> Option<usize> {
        (**self).send_buffer_size()
    }

    fn recv_buffer_size(&self) -> Option<usize> {
        (**self).recv_buffer_size()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Read an integer `SOL_SOCKET` option such as `SO_RCVBUF`.
#[cfg(unix)]
fn socket_buffer_size(fd: std::os::unix::io::RawFd, option: libc::c_int) -> Option<usize> {
    let mut optval: libc::c_int = 0;
    let mut optlen = std::mem::size_of::<libc::c_int>() as libc::socklen_t;
    let rc = unsafe {
        libc::getsockopt(
            fd,
            libc::SOL_SOCKET,
            option,
            &mut optval as *mut _ as *mut libc::c_void,
            &mut optlen,
        )
    };
    if rc != 0 || optval <= 0 {
        return None;
    }
    Some(optval as usize)
}
