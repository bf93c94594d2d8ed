//! Packed file header parsing.

pub mod packed_header;

pub use packed_header::{PackedHeader, PackedHeaderParser};
