//! LZSS ring-buffer decoder.
//!
//! The loader only needs the [`LzssDecoder`] interface; [`OkumuraLzss`] is
//! the variant found in packed asset files (4 KiB ring, 18-byte matches).

use std::io::{self, Read};

/// Ring buffer size.
pub const RING_SIZE: usize = 4096;

/// Longest match a single reference can copy.
pub const MAX_MATCH: usize = 18;

/// Matches shorter than this are stored as literals.
const THRESHOLD: usize = 2;

/// Decoder for the LZSS tag of a packed file.
pub trait LzssDecoder {
    /// Decode `compressed_len` bytes from `src` into `dest`.
    ///
    /// Returns the number of bytes the stream decoded to, which may differ
    /// from `dest.len()`; the loader treats a difference as a warning.
    fn decode(&mut self, src: &mut dyn Read, dest: &mut [u8], compressed_len: u64)
        -> io::Result<usize>;
}

/// Classic Okumura LZSS.
///
/// Each flag byte covers eight items, least significant bit first. A set
/// bit is one literal byte; a clear bit is a two-byte reference holding a
/// 12-bit ring position and a 4-bit length (`+ 3`).
pub struct OkumuraLzss {
    /// Ring buffer
    window: Vec<u8>,
    /// Ring size mask for wrap-around
    mask: usize,
    /// Current write position in ring
    pos: usize,
    /// Total bytes produced
    total_written: u64,
}

impl OkumuraLzss {
    pub fn new() -> Self {
        let mut decoder = Self {
            window: vec![b' '; RING_SIZE],
            mask: RING_SIZE - 1,
            pos: 0,
            total_written: 0,
        };
        decoder.reset();
        decoder
    }

    /// Reset the ring for the next stream.
    pub fn reset(&mut self) {
        self.window.fill(b' ');
        self.pos = RING_SIZE - MAX_MATCH;
        self.total_written = 0;
    }

    /// Emit one byte to the ring and, while there is room, to `dest`.
    #[inline]
    fn emit(&mut self, byte: u8, dest: &mut [u8]) {
        if let Some(slot) = dest.get_mut(self.total_written as usize) {
            *slot = byte;
        }
        self.window[self.pos] = byte;
        self.pos = (self.pos + 1) & self.mask;
        self.total_written += 1;
    }

    /// Copy `length` bytes starting at absolute ring position `start`.
    /// Overlapping copies repeat freshly written bytes.
    #[inline]
    fn copy_from(&mut self, start: usize, length: usize, dest: &mut [u8]) {
        for i in 0..length {
            let byte = self.window[(start + i) & self.mask];
            self.emit(byte, dest);
        }
    }

    /// Total bytes produced by the last decode.
    pub fn total_written(&self) -> u64 {
        self.total_written
    }
}

impl Default for OkumuraLzss {
    fn default() -> Self {
        Self::new()
    }
}

impl LzssDecoder for OkumuraLzss {
    fn decode(
        &mut self,
        src: &mut dyn Read,
        dest: &mut [u8],
        compressed_len: u64,
    ) -> io::Result<usize> {
        self.reset();

        let mut input = io::BufReader::new((&mut *src).take(compressed_len)).bytes();
        let mut flags: u32 = 0;

        loop {
            flags >>= 1;
            if flags & 0x100 == 0 {
                let Some(byte) = input.next().transpose()? else {
                    break;
                };
                flags = u32::from(byte) | 0xFF00;
            }

            if flags & 1 != 0 {
                let Some(byte) = input.next().transpose()? else {
                    break;
                };
                self.emit(byte, dest);
            } else {
                let Some(lo) = input.next().transpose()? else {
                    break;
                };
                let Some(hi) = input.next().transpose()? else {
                    break;
                };
                let start = lo as usize | ((hi as usize & 0xF0) << 4);
                let length = (hi as usize & 0x0F) + THRESHOLD + 1;
                self.copy_from(start, length, dest);
            }
        }

        tracing::debug!(
            compressed = compressed_len,
            decoded = self.total_written,
            "LZSS stream decoded"
        );
        Ok(self.total_written as usize)
    }
}
