//! Error types for loading packed asset files.
//!
//! This module provides the [`PackError`] type which covers every fatal
//! condition of a load. Non-fatal conditions are
//! [`LoadWarning`](crate::LoadWarning)s and never abort a load.
//!
//! ## Error Categories
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | I/O | [`Open`], [`Io`], [`Close`] | The file could not be opened, read or closed |
//! | Format | [`InvalidHeader`], [`UnsupportedCompression`] | Corrupt or future-format file |
//! | Memory | [`Allocation`], [`TooLarge`] | The declared size cannot be allocated |
//! | Decoding | [`Decompress`] | The payload is truncated |
//!
//! ## Example
//!
//! ```rust,no_run
//! use packed_asset::{load_packed_file, PackError};
//!
//! match load_packed_file("Data/Shapes/Level1.shapes") {
//!     Ok(file) => println!("{} bytes", file.data.len()),
//!     Err(PackError::UnsupportedCompression(tag)) => eprintln!("unknown tag {}", tag),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! [`Open`]: PackError::Open
//! [`Io`]: PackError::Io
//! [`Close`]: PackError::Close
//! [`InvalidHeader`]: PackError::InvalidHeader
//! [`UnsupportedCompression`]: PackError::UnsupportedCompression
//! [`Allocation`]: PackError::Allocation
//! [`TooLarge`]: PackError::TooLarge
//! [`Decompress`]: PackError::Decompress

use crate::decompress::DecompressError;
use std::io;
use std::path::PathBuf;

/// Fatal error while loading a packed file.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// The packed file could not be opened.
    #[error("Can't open packed file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or seeking the packed file failed.
    #[error("Error reading packed data: {0}")]
    Io(#[from] io::Error),

    /// Closing the packed file failed.
    #[error("Can't close packed file: {0}")]
    Close(#[source] io::Error),

    /// The file is shorter than the 8-byte header.
    #[error("Packed file header truncated: need {needed} bytes, have {have}")]
    InvalidHeader {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        have: usize,
    },

    /// The destination buffer could not be allocated.
    #[error("No memory for unpacked data ({size} bytes)")]
    Allocation { size: usize },

    /// The declared size is above the configured limit.
    #[error("Declared unpacked size {size} exceeds limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    /// The header names a scheme this crate cannot decode.
    ///
    /// The `u32` is the raw tag: `3` (ARITH-N), `4` (Huffman), `5` (LZW) or
    /// any value above `6`.
    #[error("Unsupported compression type: {0}")]
    UnsupportedCompression(u32),

    /// The compressed payload could not be decoded.
    #[error("Decompression failed: {0}")]
    Decompress(#[from] DecompressError),
}

pub type Result<T> = std::result::Result<T, PackError>;
