//! Packed file loader.
//!
//! Reads the header, allocates the destination buffer and hands the payload
//! to the decoder the compression tag selects.

use crate::decompress::{
    decode_rlb, decode_rlw, ChunkedReader, CompressionTag, LzssDecoder, OkumuraLzss,
    DEFAULT_CHUNK_CAPACITY,
};
use crate::error::{PackError, Result};
use crate::file_media::{LocalFileMedia, PackedStream};
use crate::parsing::{PackedHeader, PackedHeaderParser};
use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Options for loading packed files.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Size of the streaming chunk used by the RLB and RLW decoders.
    pub chunk_capacity: usize,
    /// Refuse files declaring more unpacked bytes than this.
    ///
    /// The whole buffer is zeroed before decoding, so without a limit a
    /// header declaring close to 4 GiB commits that much memory. On hosts
    /// that overcommit, the process can be killed before
    /// [`PackError::Allocation`] is ever returned.
    pub max_decompressed_size: Option<usize>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            max_decompressed_size: None,
        }
    }
}

/// Non-fatal problem found while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The LZSS stream decoded to a different size than the header declared.
    SizeMismatch { expected: usize, decoded: usize },
    /// The RLW payload ran out before the buffer was full; the tail is zero.
    ShortOutput { expected: usize, written: usize },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, decoded } => write!(
                f,
                "Decomp sizes don't match: header says {} bytes, stream decoded to {}",
                expected, decoded
            ),
            Self::ShortOutput { expected, written } => write!(
                f,
                "Packed data ended early: {} of {} bytes unpacked",
                written, expected
            ),
        }
    }
}

/// Receives the conditions a load reports to the user.
pub trait AlertSink {
    /// A non-fatal condition; the load carries on.
    fn warn(&self, warning: &LoadWarning);

    /// A fatal condition; the load returns this error right after.
    fn fatal(&self, _error: &PackError) {}
}

/// Default sink: reports through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAlerts;

impl AlertSink for TracingAlerts {
    fn warn(&self, warning: &LoadWarning) {
        tracing::warn!("{}", warning);
    }

    fn fatal(&self, error: &PackError) {
        tracing::error!("{}", error);
    }
}

/// A successfully loaded packed file.
#[derive(Debug)]
pub struct LoadedFile {
    pub header: PackedHeader,
    /// Unpacked bytes, exactly `header.decompressed_size` long
    pub data: Vec<u8>,
    /// Everything reported through [`AlertSink::warn`] during the load
    pub warnings: Vec<LoadWarning>,
}

impl LoadedFile {
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Loads packed files, one at a time.
pub struct PackedFileLoader {
    options: LoadOptions,
    lzss: Box<dyn LzssDecoder + Send>,
    alerts: Box<dyn AlertSink + Send + Sync>,
}

impl PackedFileLoader {
    pub fn new() -> Self {
        Self::with_options(LoadOptions::default())
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            options,
            lzss: Box::new(OkumuraLzss::new()),
            alerts: Box::new(TracingAlerts),
        }
    }

    /// Use another decoder for LZSS payloads.
    pub fn with_lzss(mut self, lzss: impl LzssDecoder + Send + 'static) -> Self {
        self.lzss = Box::new(lzss);
        self
    }

    /// Send warnings and fatal conditions somewhere other than the log.
    pub fn with_alerts(mut self, alerts: impl AlertSink + Send + Sync + 'static) -> Self {
        self.alerts = Box::new(alerts);
        self
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Open and unpack the file at `path`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadedFile> {
        let media = LocalFileMedia::new(path);
        tracing::debug!(file = media.name(), "loading packed file");

        let file = match media.open() {
            Ok(file) => file,
            Err(e) => {
                self.alerts.fatal(&e);
                return Err(e);
            }
        };
        self.load_from_reader(file)
    }

    /// Open the file with tokio and unpack it on the blocking pool.
    ///
    /// The payload streams through the same fixed-size chunk as [`load`].
    /// The loader moves to the blocking task for the duration of the load;
    /// if that task panics, it is left with default settings.
    ///
    /// [`load`]: Self::load
    #[cfg(feature = "async")]
    #[cfg_attr(docsrs, doc(cfg(feature = "async")))]
    pub async fn load_async(&mut self, path: impl AsRef<Path>) -> Result<LoadedFile> {
        let media = LocalFileMedia::new(path);
        tracing::debug!(file = media.name(), "loading packed file");

        let file = match media.open_async().await {
            Ok(file) => file,
            Err(e) => {
                self.alerts.fatal(&e);
                return Err(e);
            }
        };

        let mut loader = std::mem::take(self);
        let job = tokio::task::spawn_blocking(move || {
            let result = loader.load_from_reader(file);
            (loader, result)
        });
        let (loader, result) = job
            .await
            .map_err(|e| PackError::Io(std::io::Error::other(e)))?;
        *self = loader;
        result
    }

    /// Unpack a packed file from `stream`, starting at its current position.
    ///
    /// The stream is closed when the load succeeds.
    pub fn load_from_reader<S: PackedStream>(&mut self, stream: S) -> Result<LoadedFile> {
        self.unpack(stream).inspect_err(|e| self.alerts.fatal(e))
    }

    fn unpack<S: PackedStream>(&mut self, mut stream: S) -> Result<LoadedFile> {
        let start = stream.stream_position()?;
        let file_len = stream.seek(SeekFrom::End(0))?.saturating_sub(start);
        stream.seek(SeekFrom::Start(start))?;

        let header = PackedHeaderParser::read(&mut stream)?;
        let payload_len = file_len.saturating_sub(PackedHeader::SIZE as u64);
        let size = header.decompressed_size as usize;

        let tag = header
            .tag()
            .ok_or(PackError::UnsupportedCompression(header.compression))?;

        tracing::debug!(
            %tag,
            unpacked = size,
            packed = payload_len,
            "packed file header"
        );

        if let Some(limit) = self.options.max_decompressed_size {
            if size > limit {
                return Err(PackError::TooLarge { size, limit });
            }
        }
        let mut data = allocate(size)?;
        let mut warnings = Vec::new();

        match tag {
            CompressionTag::Rlb => {
                let mut reader =
                    ChunkedReader::with_capacity(&mut stream, self.options.chunk_capacity);
                decode_rlb(&mut reader, &mut data)?;
            }
            CompressionTag::Rlw => {
                let mut reader =
                    ChunkedReader::with_capacity(&mut stream, self.options.chunk_capacity);
                let written = decode_rlw(&mut reader, &mut data, payload_len)?;
                if written < size {
                    self.raise(
                        &mut warnings,
                        LoadWarning::ShortOutput {
                            expected: size,
                            written,
                        },
                    );
                }
            }
            CompressionTag::Lzss => {
                let decoded = self.lzss.decode(&mut stream, &mut data, payload_len)?;
                if decoded != size {
                    self.raise(
                        &mut warnings,
                        LoadWarning::SizeMismatch {
                            expected: size,
                            decoded,
                        },
                    );
                }
            }
            CompressionTag::None => stream.read_exact(&mut data)?,
            CompressionTag::ArithN | CompressionTag::Huffman | CompressionTag::Lzw => {
                return Err(PackError::UnsupportedCompression(header.compression));
            }
        }

        stream.close().map_err(PackError::Close)?;

        Ok(LoadedFile {
            header,
            data,
            warnings,
        })
    }

    /// Report a warning as soon as it is found, then keep it for the result.
    fn raise(&self, warnings: &mut Vec<LoadWarning>, warning: LoadWarning) {
        self.alerts.warn(&warning);
        warnings.push(warning);
    }
}

impl Default for PackedFileLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a packed file with default options.
pub fn load_packed_file(path: impl AsRef<Path>) -> Result<LoadedFile> {
    PackedFileLoader::new().load(path)
}

fn allocate(size: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(size)
        .map_err(|_| PackError::Allocation { size })?;
    data.resize(size, 0);
    Ok(data)
}
