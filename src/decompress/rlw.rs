//! Run-Length-Word decoder.
//!
//! Runs are counted in 16-bit words but the run header is a single byte,
//! so words in the payload are not necessarily aligned to even offsets.
//! All word reads go through [`ChunkedReader::next_word`], which keeps a
//! word from being split across two chunks.

use super::{ChunkedReader, Result};
use std::io::{Read, Seek};

const PACKED_FLAG: u8 = 0x80;
const RUN_MASK: u8 = 0x7F;

/// Decode an RLW stream into `dest`.
///
/// `source_len` is a countdown of payload bytes: the length byte costs one,
/// the seed of a packed run costs two however often it repeats, and every
/// literal word costs two. Decoding stops when the countdown runs out or
/// `dest` is full, whichever comes first. Words keep their on-disk byte
/// order in `dest`.
///
/// Returns the number of bytes written.
pub fn decode_rlw<R: Read + Seek>(
    reader: &mut ChunkedReader<R>,
    dest: &mut [u8],
    source_len: u64,
) -> Result<usize> {
    let mut countdown = source_len as i64;
    let mut out = WordSink { dest, pos: 0 };

    while countdown > 0 && !out.is_full() {
        let length = reader.next_byte()?;
        countdown -= 1;

        if length & PACKED_FLAG != 0 {
            let run = (length & RUN_MASK) as usize + 1;
            let seed = reader.next_word()?;
            countdown -= 2;
            for _ in 0..run {
                if !out.push(seed) {
                    tracing::debug!(run, "RLW packed run clipped at end of output");
                    break;
                }
            }
        } else {
            let run = length as usize + 1;
            for _ in 0..run {
                if out.is_full() {
                    tracing::debug!(run, "RLW literal run clipped at end of output");
                    break;
                }
                let word = reader.next_word()?;
                countdown -= 2;
                out.push(word);
            }
        }
    }

    Ok(out.pos)
}

/// Bounded word writer over a byte buffer.
struct WordSink<'a> {
    dest: &'a mut [u8],
    pos: usize,
}

impl WordSink<'_> {
    fn is_full(&self) -> bool {
        self.pos >= self.dest.len()
    }

    /// Store one word; an odd trailing byte receives the high half only.
    /// Returns `false` once nothing more fits.
    #[inline]
    fn push(&mut self, word: u16) -> bool {
        let left = self.dest.len() - self.pos;
        if left == 0 {
            return false;
        }
        let bytes = word.to_be_bytes();
        let n = left.min(2);
        self.dest[self.pos..self.pos + n].copy_from_slice(&bytes[..n]);
        self.pos += n;
        true
    }
}
