//! Typed XDR value codec over blocking byte-stream connections.
//!
//! [`WireCodec`] binds to one [`Transport`] and exposes paired send and
//! receive operations for unsigned ints and hypers, booleans, fixed and
//! variable-length opaque data, UUIDs, timestamps and arrays, using the
//! canonical 4-byte-aligned big-endian XDR layout (RFC 4506).
//!
//! # Example
//!
//! ```
//! use xdrsock::{MemoryTransport, Uuid, WireCodec};
//!
//! let mut tx = WireCodec::new(MemoryTransport::new());
//! tx.send_string(b"hello").unwrap();
//! tx.send_array(&[1u32, 2, 3], |c, v| c.send_u32(*v)).unwrap();
//! tx.send_uuid(&Uuid::from_u128(42)).unwrap();
//!
//! let wire = tx.into_inner().take_written();
//! let mut rx = WireCodec::new(MemoryTransport::with_incoming(wire));
//! assert_eq!(&rx.receive_string().unwrap()[..], b"hello");
//! assert_eq!(rx.receive_array(WireCodec::receive_u32).unwrap(), vec![1, 2, 3]);
//! assert_eq!(rx.receive_uuid().unwrap(), Uuid::from_u128(42));
//! ```
//!
//! Over a socket the codec is used the same way; `TcpStream` and
//! `UnixStream` implement [`Transport`] directly:
//!
//! ```ignore
//! let stream = std::net::TcpStream::connect("127.0.0.1:7000")?;
//! let mut codec = xdrsock::WireCodec::new(stream);
//! codec.send_u32(1)?;
//! let ts = codec.receive_timestamp()?;
//! ```

mod codec;
mod config;
mod error;
mod transport;

pub use codec::WireCodec;
pub use config::{
    CodecConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_ARRAY_LEN, DEFAULT_MAX_STRING_LEN,
    MAX_CHUNK_SIZE, MIN_CHUNK_SIZE,
};
pub use error::{Error, Result};
pub use transport::{MemoryTransport, Transport};

pub use xdrsock_xdr::Uuid;
