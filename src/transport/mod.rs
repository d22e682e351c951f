//! Chunk sources: transport abstraction over the byte stream
//!
//! The core never touches a socket directly. Anything that can hand over
//! byte chunks — a TCP stream, an HTTP body split into POST payloads, a
//! scripted test fixture — implements [`ChunkSource`].

use crate::error::{Error, Result};
use std::io::Read;
use std::net::TcpStream;

pub mod mock;
pub use mock::MockChunkSource;

/// Blocking pull source of raw byte chunks
pub trait ChunkSource {
    /// Read the next chunk.
    ///
    /// - `Ok(Some(bytes))`: one delivered chunk, arbitrary length > 0
    /// - `Ok(None)`: peer closed the stream cleanly
    /// - `Err(_)`: transport failure; session-fatal
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>>;
}

/// Chunk source backed by a connected TCP stream
pub struct TcpChunkSource {
    stream: TcpStream,
    /// Reusable read buffer; its length is the per-read ceiling
    buffer: Vec<u8>,
}

impl TcpChunkSource {
    /// Wrap a connected stream, reading up to `read_buffer_size` bytes per
    /// chunk
    pub fn new(stream: TcpStream, read_buffer_size: usize) -> Self {
        Self {
            stream,
            buffer: vec![0u8; read_buffer_size],
        }
    }
}

impl ChunkSource for TcpChunkSource {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            match self.stream.read(&mut self.buffer) {
                Ok(0) => return Ok(None),
                Ok(n) => return Ok(Some(self.buffer[..n].to_vec())),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == std::io::ErrorKind::ConnectionReset => {
                    // Abrupt client exit; same session outcome as a clean close
                    log::debug!("connection reset by peer");
                    return Ok(None);
                }
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }
}
