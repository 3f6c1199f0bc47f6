//! Directory walking implementation using walkdir.

use super::{has_image_extension, is_hidden, ScanResult};
use crate::error::ScanError;
use crate::events::{EventSender, ScanEvent};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Expand every input path. Missing inputs are recorded, not fatal.
    pub fn scan(&self, paths: &[PathBuf], events: &EventSender) -> ScanResult {
        let mut result = ScanResult::default();

        events.scan(ScanEvent::Started {
            paths: paths.to_vec(),
        });

        for path in paths {
            if path.is_file() {
                Self::found(&mut result, path.clone(), events);
            } else if path.is_dir() {
                self.scan_directory(path, &mut result, events);
            } else {
                Self::failed(
                    &mut result,
                    ScanError::PathNotFound { path: path.clone() },
                    events,
                );
            }
        }

        events.scan(ScanEvent::Completed {
            total_files: result.files.len(),
        });

        result
    }

    fn scan_directory(&self, root: &Path, result: &mut ScanResult, events: &EventSender) {
        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let include_hidden = self.config.include_hidden;
        let entries = walker
            .into_iter()
            .filter_entry(|entry| include_hidden || entry.depth() == 0 || !is_hidden(entry.path()));

        for entry_result in entries {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_file() && has_image_extension(path) {
                        Self::found(result, path.to_path_buf(), events);
                    }
                }
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                    Self::failed(result, ScanError::ReadDirectory { path, source }, events);
                }
            }
        }
    }

    fn found(result: &mut ScanResult, path: PathBuf, events: &EventSender) {
        events.scan(ScanEvent::FileFound { path: path.clone() });
        result.files.push(path);
    }

    fn failed(result: &mut ScanResult, error: ScanError, events: &EventSender) {
        if events.is_enabled() {
            let path = match &error {
                ScanError::PathNotFound { path } | ScanError::ReadDirectory { path, .. } => {
                    path.clone()
                }
            };
            events.scan(ScanEvent::Error {
                path,
                message: error.to_string(),
            });
        }
        result.errors.push(error);
    }
}
