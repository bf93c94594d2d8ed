//! Byte sources for packed files.

use crate::error::{PackError, Result};
use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::{Path, PathBuf};

/// Seekable stream a packed file is read from.
///
/// `close` is the last call of every load; the default just drops the
/// stream.
pub trait PackedStream: Read + Seek {
    fn close(self) -> io::Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

impl PackedStream for File {}

impl<T: AsRef<[u8]>> PackedStream for Cursor<T> {}

impl<S: PackedStream + ?Sized> PackedStream for &mut S {}

/// Local packed file.
#[derive(Debug, Clone)]
pub struct LocalFileMedia {
    path: PathBuf,
    name: String,
}

impl LocalFileMedia {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open for a synchronous load.
    pub fn open(&self) -> Result<File> {
        File::open(&self.path).map_err(|source| PackError::Open {
            path: self.path.clone(),
            source,
        })
    }

    /// Open with tokio and hand back a blocking handle.
    ///
    /// The payload is still pulled one chunk at a time by the loader; only
    /// the open happens on the async runtime.
    #[cfg(feature = "async")]
    #[cfg_attr(docsrs, doc(cfg(feature = "async")))]
    pub async fn open_async(&self) -> Result<File> {
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|source| PackError::Open {
                path: self.path.clone(),
                source,
            })?;
        Ok(file.into_std().await)
    }
}
