//! Packed file header parser.
//!
//! Every packed file starts with two big-endian `u32`s: the unpacked size
//! and the compression tag. The payload follows immediately.

use crate::decompress::CompressionTag;
use crate::error::{PackError, Result};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedHeader {
    /// Size of the unpacked data in bytes
    pub decompressed_size: u32,
    /// Raw compression tag, see [`CompressionTag`]
    pub compression: u32,
}

impl PackedHeader {
    /// On-disk header size.
    pub const SIZE: usize = 8;

    /// Decode the compression tag; `None` for values this format never defined.
    pub fn tag(&self) -> Option<CompressionTag> {
        CompressionTag::from_u32(self.compression)
    }
}

pub struct PackedHeaderParser;

impl PackedHeaderParser {
    pub const HEADER_SIZE: usize = PackedHeader::SIZE;

    /// Parse a header from the start of `buffer`.
    pub fn parse(buffer: &[u8]) -> Result<PackedHeader> {
        if buffer.len() < Self::HEADER_SIZE {
            return Err(PackError::InvalidHeader {
                needed: Self::HEADER_SIZE,
                have: buffer.len(),
            });
        }

        let mut fields = buffer;
        let decompressed_size = fields.read_u32::<BigEndian>()?;
        let compression = fields.read_u32::<BigEndian>()?;

        Ok(PackedHeader {
            decompressed_size,
            compression,
        })
    }

    /// Read a header from a stream, leaving it positioned at the payload.
    pub fn read<R: Read>(reader: &mut R) -> Result<PackedHeader> {
        let mut raw = Vec::with_capacity(Self::HEADER_SIZE);
        reader
            .take(Self::HEADER_SIZE as u64)
            .read_to_end(&mut raw)?;
        Self::parse(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_big_endian() {
        let buffer = [0x00, 0x01, 0x02, 0x03, 0x00, 0x00, 0x00, 0x06, 0xAA];
        let header = PackedHeaderParser::parse(&buffer).unwrap();
        assert_eq!(header.decompressed_size, 0x0001_0203);
        assert_eq!(header.compression, 6);
        assert_eq!(header.tag(), Some(CompressionTag::Rlw));
    }

    #[test]
    fn test_unknown_tag() {
        let buffer = [0, 0, 0, 1, 0x12, 0x34, 0x56, 0x78];
        let header = PackedHeaderParser::parse(&buffer).unwrap();
        assert_eq!(header.tag(), None);
    }

    #[test]
    fn test_read_leaves_stream_at_payload() {
        let data = [0, 0, 0, 4, 0, 0, 0, 0, 0x03, 0xAA];
        let mut stream = &data[..];
        let header = PackedHeaderParser::read(&mut stream).unwrap();
        assert_eq!(header.tag(), Some(CompressionTag::Rlb));
        assert_eq!(stream, &[0x03, 0xAA]);
    }

    #[test]
    fn test_read_across_short_reads() {
        let first = [0u8, 0, 0];
        let rest = [0x10u8, 0, 0, 0, 2, 0xEE];
        let mut stream = (&first[..]).chain(&rest[..]);

        let header = PackedHeaderParser::read(&mut stream).unwrap();
        assert_eq!(header.decompressed_size, 0x10);
        assert_eq!(header.tag(), Some(CompressionTag::None));

        let mut payload = Vec::new();
        stream.read_to_end(&mut payload).unwrap();
        assert_eq!(payload, [0xEE]);
    }

    #[test]
    fn test_buffer_too_small() {
        let buffer = [0x00, 0x00, 0x10];
        assert!(matches!(
            PackedHeaderParser::parse(&buffer),
            Err(PackError::InvalidHeader { needed: 8, have: 3 })
        ));

        let mut stream = &buffer[..];
        assert!(matches!(
            PackedHeaderParser::read(&mut stream),
            Err(PackError::InvalidHeader { have: 3, .. })
        ));
    }
}
