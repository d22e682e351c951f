//! Mock chunk source for testing

use super::ChunkSource;
use crate::error::{Error, Result};
use std::collections::VecDeque;

/// Scripted chunk source for unit and integration tests.
///
/// Delivers injected chunks in order, preserving the exact chunk boundaries
/// they were injected with, then reports end-of-stream — or a scripted
/// transport error, if one was armed.
pub struct MockChunkSource {
    chunks: VecDeque<Vec<u8>>,
    error_at_end: Option<std::io::ErrorKind>,
}

impl MockChunkSource {
    /// Create an empty source that immediately reports end-of-stream
    pub fn new() -> Self {
        Self {
            chunks: VecDeque::new(),
            error_at_end: None,
        }
    }

    /// Queue one chunk exactly as it should be delivered
    pub fn inject(&mut self, chunk: &[u8]) {
        self.chunks.push_back(chunk.to_vec());
    }

    /// After all chunks are drained, fail with this I/O error kind instead
    /// of reporting a clean close
    pub fn fail_at_end(&mut self, kind: std::io::ErrorKind) {
        self.error_at_end = Some(kind);
    }
}

impl ChunkSource for MockChunkSource {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        match self.chunks.pop_front() {
            Some(chunk) => Ok(Some(chunk)),
            None => match self.error_at_end.take() {
                Some(kind) => Err(Error::Io(std::io::Error::new(kind, "scripted failure"))),
                None => Ok(None),
            },
        }
    }
}

impl Default for MockChunkSource {
    fn default() -> Self {
        Self::new()
    }
}
