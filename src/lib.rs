//! Streaming decoder for packed game asset files.
//!
//! A packed file is an 8-byte big-endian header (unpacked size, compression
//! tag) followed by a payload in one of several schemes. The payload is read
//! through a fixed-size chunk rather than all at once.
//!
//! Supported tags: RLB (run-length bytes), RLW (run-length 16-bit words),
//! LZSS and stored. ARITH-N, Huffman and LZW are recognised but rejected.
//!
//! ## Features
//! - `async` - Async file open with tokio, decoding on the blocking pool
//! - `cli` - The `unpack` command-line tool
//!
//! ## Example
//!
//! ```rust,no_run
//! use packed_asset::{LoadOptions, PackedFileLoader};
//!
//! let mut loader = PackedFileLoader::with_options(LoadOptions {
//!     chunk_capacity: 4096,
//!     ..Default::default()
//! });
//! let file = loader.load("Data/Images/Title.image")?;
//! for warning in &file.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! println!("{} bytes", file.data.len());
//! # Ok::<(), packed_asset::PackError>(())
//! ```

pub mod decompress;
pub mod error;
mod file_media;
mod loader;
pub mod parsing;

pub use error::PackError;
pub use file_media::{LocalFileMedia, PackedStream};
pub use loader::{
    load_packed_file, AlertSink, LoadOptions, LoadWarning, LoadedFile, PackedFileLoader,
    TracingAlerts,
};
pub use parsing::{PackedHeader, PackedHeaderParser};

// Re-export decompression types
pub use decompress::{
    decode_rlb, decode_rlw, ChunkedReader, CompressionTag, DecompressError, LzssDecoder,
    OkumuraLzss,
};
