//! File-based blob storage for captured clipboard images.
//!
//! Each capture gets its own timestamp-named PNG file under the image
//! directory. The files are referenced by path from the owning history item
//! and removed by the store when that item is evicted.

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Error;

/// Owns the image blob directory and hands out fresh files for captures.
pub struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    /// Open the blob store, creating the directory if needed. Failure here is
    /// fatal to the capture session.
    pub fn open(dir: PathBuf) -> Result<Self, Error> {
        fs::create_dir_all(&dir).map_err(|source| Error::Setup {
            path: dir.clone(),
            source,
        })?;
        Ok(BlobStore { dir })
    }

    /// Write PNG bytes to a fresh file and return its path.
    pub fn store(&self, png_bytes: &[u8]) -> Result<PathBuf, Error> {
        let path = self.fresh_path();
        fs::write(&path, png_bytes).map_err(|source| Error::Blob {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), size = png_bytes.len(), "Stored image blob");
        Ok(path)
    }

    /// Timestamp-derived filename, with a counter suffix if the clock is too
    /// coarse to keep consecutive captures apart.
    fn fresh_path(&self) -> PathBuf {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let mut path = self.dir.join(format!("img_{}.png", nanos));
        let mut attempt = 1u32;
        while path.exists() {
            path = self.dir.join(format!("img_{}-{}.png", nanos, attempt));
            attempt += 1;
        }
        path
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
