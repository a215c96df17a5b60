//! TCP socket transport implementation.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};

use super::Transport;

impl Transport for TcpStream {
    fn send_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.write_all(data)?;
        self.flush()
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read(buf)
    }

    #[cfg(unix)]
    fn send_buffer_size(&self) -> Option<usize> {
        use std::os::unix::io::AsRawFd;
        super::socket_buffer_size(self.as_raw_fd(), libc::SO_SNDBUF)
    }

    #[cfg(unix)]
    fn recv_buffer_size(&self) -> Option<usize> {
        use std::os::unix::io::AsRawFd;
        super::socket_buffer_size(self.as_raw_fd(), libc::SO_RCVBUF)
    }

    fn close(&mut self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            // Peer already gone.
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}
