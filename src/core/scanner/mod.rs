//! # Scanner Module
//!
//! Expands command-line inputs into a list of image files.
//!
//! Directories are walked for files with a PNG, JPEG or WebP extension.
//! Files named explicitly are passed through untouched; the decode boundary
//! decides whether they are usable.
//!
//! ## Example
//! ```rust,ignore
//! use image_blockhash::core::scanner::{ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(&["/Users/photos".into()], &EventSender::disabled());
//! ```

mod walker;

pub use walker::{ScanConfig, WalkDirScanner};

use crate::core::decode::ContainerFormat;
use crate::error::ScanError;
use std::path::{Path, PathBuf};

/// Outcome of a scan; errors never stop the remaining inputs
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Image files, in discovery order
    pub files: Vec<PathBuf>,
    /// Inputs that could not be read
    pub errors: Vec<ScanError>,
}

/// Whether `path` looks like a supported image by extension
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(ContainerFormat::from_extension)
        .is_some()
}

/// Whether the final path component starts with a dot
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
