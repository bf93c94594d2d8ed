//! Chunked reader for packed payload streams.
//!
//! Streams the payload through a fixed-size window instead of loading the
//! whole file, refilling the window in place when it runs dry.

use super::{DecompressError, Result};
use std::io::{self, Read, Seek, SeekFrom};

/// Default chunk size, matching the packet size packed files were written for.
pub const DEFAULT_CHUNK_CAPACITY: usize = 20000;

/// Smallest usable chunk: a word must always fit after a refill.
pub const MIN_CHUNK_CAPACITY: usize = 2;

/// Byte reader that pulls from a stream one chunk at a time.
pub struct ChunkedReader<R> {
    inner: R,
    chunk: Box<[u8]>,
    /// Read position in `chunk`
    cursor: usize,
    /// Unread bytes left in `chunk`
    remaining: usize,
    refills: u64,
}

impl<R: Read> ChunkedReader<R> {
    /// Create a reader with the default 20000-byte chunk.
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, DEFAULT_CHUNK_CAPACITY)
    }

    /// Create a reader with a custom chunk size (at least [`MIN_CHUNK_CAPACITY`]).
    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            chunk: vec![0; capacity.max(MIN_CHUNK_CAPACITY)].into_boxed_slice(),
            cursor: 0,
            remaining: 0,
            refills: 0,
        }
    }

    /// Refill the chunk from the stream.
    ///
    /// Short reads are retried until the chunk is full or the stream reports
    /// end of file. Returns the number of bytes now available.
    pub fn refill(&mut self) -> Result<usize> {
        let mut filled = 0;
        while filled < self.chunk.len() {
            match self.inner.read(&mut self.chunk[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        self.cursor = 0;
        self.remaining = filled;
        self.refills += 1;
        tracing::trace!(refill = self.refills, bytes = filled, "chunk refilled");
        Ok(filled)
    }

    /// Read the next byte, refilling first if the chunk is exhausted.
    #[inline]
    pub fn next_byte(&mut self) -> Result<u8> {
        if self.remaining == 0 && self.refill()? == 0 {
            return Err(DecompressError::UnexpectedEof);
        }

        let byte = self.chunk[self.cursor];
        self.cursor += 1;
        self.remaining -= 1;
        Ok(byte)
    }

    /// Chunk size in bytes.
    pub fn capacity(&self) -> usize {
        self.chunk.len()
    }

    /// Unread bytes left in the current chunk.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Number of refills performed so far.
    pub fn refill_count(&self) -> u64 {
        self.refills
    }

    /// Give back the underlying stream.
    ///
    /// The stream position is at the end of the last chunk read, not at the
    /// cursor.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ChunkedReader<R> {
    /// Read the next 16-bit word in on-disk (big-endian) order.
    ///
    /// A word never straddles two chunks: with a single byte left, the
    /// stream is moved back over that byte and the chunk is refilled so the
    /// word starts at the beginning of the new chunk.
    #[inline]
    pub fn next_word(&mut self) -> Result<u16> {
        if self.remaining == 1 {
            self.inner.seek(SeekFrom::Current(-1))?;
            self.refill()?;
        } else if self.remaining == 0 {
            self.refill()?;
        }

        if self.remaining < 2 {
            return Err(DecompressError::UnexpectedEof);
        }

        let word = u16::from_be_bytes([self.chunk[self.cursor], self.chunk[self.cursor + 1]]);
        self.cursor += 2;
        self.remaining -= 2;
        Ok(word)
    }
}
