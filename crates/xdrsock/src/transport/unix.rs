//! Unix socket transport implementation.

use std::io::{self, Read, Write};
use std::net::Shutdown;
use std::os::unix::io::AsRawFd;
use std::os::unix::net::UnixStream;

use super::{socket_buffer_size, Transport};

impl Transport for UnixStream {
    fn send_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.write_all(data)?;
        self.flush()
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read(buf)
    }

    fn send_buffer_size(&self) -> Option<usize> {
        socket_buffer_size(self.as_raw_fd(), libc::SO_SNDBUF)
    }

    fn recv_buffer_size(&self) -> Option<usize> {
        socket_buffer_size(self.as_raw_fd(), libc::SO_RCVBUF)
    }

    fn close(&mut self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_pair_send_recv() {
        let (mut a, mut b) = UnixStream::pair().unwrap();
        a.send_all(&[1, 2, 3, 4]).unwrap();

        let mut buf = [0u8; 4];
        let mut got = 0;
        while got < 4 {
            got += b.recv(&mut buf[got..]).unwrap();
        }
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn test_unix_reports_buffer_sizes() {
        let (a, _b) = UnixStream::pair().unwrap();
        assert!(a.send_buffer_size().unwrap() > 0);
        assert!(a.recv_buffer_size().unwrap() > 0);
    }

    #[test]
    fn test_unix_close_signals_eof() {
        let (mut a, mut b) = UnixStream::pair().unwrap();
        Transport::close(&mut a).unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(b.recv(&mut buf).unwrap(), 0);
    }
}
