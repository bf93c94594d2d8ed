//! Run-Length-Byte decoder.

use super::{ChunkedReader, Result};
use std::io::Read;

/// Largest control byte that still starts a literal run.
const LITERAL_MAX: u8 = 0x7F;

/// Decode an RLB stream until `dest` is full.
///
/// A control byte above `0x7F` is a packed run: the next byte repeated
/// `257 - control` times. Anything else is a literal run of `control + 1`
/// bytes copied from the stream. A run that would run past the end of
/// `dest` is clipped.
pub fn decode_rlb<R: Read>(reader: &mut ChunkedReader<R>, dest: &mut [u8]) -> Result<()> {
    let mut pos = 0;

    while pos < dest.len() {
        let count = reader.next_byte()?;
        let left = dest.len() - pos;

        if count > LITERAL_MAX {
            let run = 257 - count as usize;
            let data = reader.next_byte()?;
            let n = run.min(left);
            if n < run {
                tracing::debug!(run, written = n, "RLB packed run clipped at end of output");
            }
            dest[pos..pos + n].fill(data);
            pos += n;
        } else {
            let run = count as usize + 1;
            let n = run.min(left);
            if n < run {
                tracing::debug!(run, written = n, "RLB literal run clipped at end of output");
            }
            for slot in &mut dest[pos..pos + n] {
                *slot = reader.next_byte()?;
            }
            pos += n;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompress::DecompressError;
    use std::io::Cursor;

    fn decode(payload: &[u8], size: usize) -> Result<Vec<u8>> {
        let mut reader = ChunkedReader::new(Cursor::new(payload));
        let mut out = vec![0; size];
        decode_rlb(&mut reader, &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_literal_run() {
        let out = decode(&[0x03, 0xAA, 0xBB, 0xCC, 0xDD], 4).unwrap();
        assert_eq!(out, [0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn test_packed_run() {
        // 0xFE -> 3 copies
        let out = decode(&[0xFE, 0x7F], 3).unwrap();
        assert_eq!(out, [0x7F; 3]);
    }

    #[test]
    fn test_control_byte_classes() {
        for c in 0x00..=0x7Fu8 {
            let len = c as usize + 1;
            let mut payload = vec![c];
            payload.extend((0..len).map(|i| i as u8));
            let out = decode(&payload, len).unwrap();
            assert_eq!(out, (0..len).map(|i| i as u8).collect::<Vec<_>>(), "literal 0x{:02x}", c);
        }

        for c in 0x80..=0xFFu8 {
            let len = 256 - c as usize + 1;
            let out = decode(&[c, 0x5A], len).unwrap();
            assert_eq!(out.len(), len);
            assert!(out.iter().all(|&b| b == 0x5A), "packed 0x{:02x}", c);
        }
    }

    #[test]
    fn test_widest_packed_run() {
        let out = decode(&[0x80, 0x01], 129).unwrap();
        assert_eq!(out, vec![0x01; 129]);
    }

    #[test]
    fn test_run_clipped_to_output() {
        // Packed run of 10 into a 4-byte buffer stops at 4 without touching
        // any following data.
        let out = decode(&[0xF7, 0x33], 4).unwrap();
        assert_eq!(out, [0x33; 4]);

        let out = decode(&[0x05, 1, 2, 3], 3).unwrap();
        assert_eq!(out, [1, 2, 3]);
    }

    #[test]
    fn test_mixed_runs() {
        let payload = [0x01, b'h', b'i', 0xFD, b'!', 0x00, b'.'];
        let out = decode(&payload, 7).unwrap();
        assert_eq!(out, b"hi!!!!.");
    }

    #[test]
    fn test_truncated_payload() {
        assert!(matches!(
            decode(&[0x03, 0xAA], 4),
            Err(DecompressError::UnexpectedEof)
        ));
        assert!(matches!(decode(&[], 1), Err(DecompressError::UnexpectedEof)));
    }

    #[test]
    fn test_empty_output_reads_nothing() {
        let mut reader = ChunkedReader::new(Cursor::new(&[0x03u8][..]));
        decode_rlb(&mut reader, &mut []).unwrap();
        assert_eq!(reader.refill_count(), 0);
    }
}
