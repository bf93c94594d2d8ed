//! Packed asset decompression algorithms.
//!
//! This module provides the run-length decoders used by packed asset files,
//! the streaming reader they consume, and the LZSS collaborator interface.
//!
//! ## Decoders
//!
//! | Decoder | Tag | Granularity |
//! |---------|-----|-------------|
//! | [`decode_rlb`] | `0` (RLB) | byte runs |
//! | [`decode_rlw`] | `6` (RLW) | 16-bit word runs |
//! | [`LzssDecoder`] | `1` (LZSS) | pluggable, [`OkumuraLzss`] by default |
//!
//! ## Control Bytes
//!
//! Both run-length schemes prefix every run with one control byte:
//!
//! | Scheme | High bit set | High bit clear |
//! |--------|--------------|----------------|
//! | RLB | `257 - c` copies of one byte | `c + 1` literal bytes |
//! | RLW | `(c & 0x7F) + 1` copies of one word | `c + 1` literal words |
//!
//! ## Architecture
//!
//! ```text
//! Packed payload (file)
//!       ↓
//! ┌───────────────┐
//! │ ChunkedReader │ ← fixed-size window, refilled from the stream
//! └───────────────┘
//!       ↓
//! ┌───────────────┐
//! │ RLB / RLW     │ ← next_byte / next_word only
//! └───────────────┘
//!       ↓
//! Destination buffer (exactly the declared size)
//! ```

mod chunk_reader;
mod lzss;
mod rlb;
mod rlw;


pub use chunk_reader::{ChunkedReader, DEFAULT_CHUNK_CAPACITY, MIN_CHUNK_CAPACITY};
pub use lzss::{LzssDecoder, OkumuraLzss};
pub use rlb::decode_rlb;
pub use rlw::decode_rlw;

use std::fmt;
use std::io;

/// Decompression errors.
#[derive(Debug, thiserror::Error)]
pub enum DecompressError {
    /// The payload ended before the declared output was produced.
    #[error("Unexpected end of packed data")]
    UnexpectedEof,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DecompressError>;

/// Compression schemes a packed file header can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CompressionTag {
    /// Run-Length-Byte
    Rlb = 0,
    /// LZSS, decoded by an [`LzssDecoder`]
    Lzss = 1,
    /// Stored verbatim
    None = 2,
    /// ARITH-N (never implemented)
    ArithN = 3,
    /// Huffman (never implemented)
    Huffman = 4,
    /// LZW15 (never implemented)
    Lzw = 5,
    /// Run-Length-Word
    Rlw = 6,
}

impl CompressionTag {
    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::Rlb),
            1 => Some(Self::Lzss),
            2 => Some(Self::None),
            3 => Some(Self::ArithN),
            4 => Some(Self::Huffman),
            5 => Some(Self::Lzw),
            6 => Some(Self::Rlw),
            _ => None,
        }
    }

    /// Whether this crate can decode the scheme.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Rlb | Self::Lzss | Self::None | Self::Rlw)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rlb => "RLB",
            Self::Lzss => "LZSS",
            Self::None => "none",
            Self::ArithN => "ARITH-N",
            Self::Huffman => "Huffman",
            Self::Lzw => "LZW",
            Self::Rlw => "RLW",
        }
    }
}

impl fmt::Display for CompressionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
