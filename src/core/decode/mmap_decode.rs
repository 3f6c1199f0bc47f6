//! Memory-mapped file reading for the decode boundary.
//!
//! Large images are mapped instead of copied into the heap; small files
//! use a plain read, which has lower overhead.

use crate::error::DecodeError;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Minimum file size to use memory-mapped I/O (1MB)
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Read a file's bytes, memory-mapping files of 1MB or more.
pub fn read_file_bytes(path: &Path) -> Result<FileBytes, DecodeError> {
    let io_error = |source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path).map_err(io_error)?;

    if metadata.len() < MMAP_THRESHOLD {
        return std::fs::read(path).map(FileBytes::Vec).map_err(io_error);
    }

    let file = File::open(path).map_err(io_error)?;

    // SAFETY: the map is read-only and owns the file handle for its lifetime.
    let mmap = unsafe { Mmap::map(&file) }.map_err(io_error)?;

    Ok(FileBytes::Mmap(mmap))
}

/// File bytes that may be either owned or memory-mapped.
pub enum FileBytes {
    /// Standard heap-allocated bytes
    Vec(Vec<u8>),
    /// Memory-mapped bytes (zero-copy from disk)
    Mmap(Mmap),
}

impl AsRef<[u8]> for FileBytes {
    fn as_ref(&self) -> &[u8] {
        match self {
            FileBytes::Vec(v) => v,
            FileBytes::Mmap(m) => m,
        }
    }
}

impl std::ops::Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_ref()
    }
}
