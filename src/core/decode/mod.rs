//! # Decode Module
//!
//! Turns image bytes from a path or an in-memory buffer into a [`PixelGrid`].
//!
//! ## Dispatch Rules
//! 1. Sniff the container from magic bytes (PNG, JPEG, WebP)
//! 2. If the source carries a file extension, it must name the same
//!    container; any disagreement is a [`DecodeError::FormatMismatch`]
//! 3. Without an extension, the sniffed type alone decides and a
//!    [`DispatchNotice::ExtensionUnchecked`] is attached to the result
//!
//! Only the first frame of a container is decoded.

mod fast_decode;
mod format;
mod mmap_decode;

pub use fast_decode::FastDecoder;
pub use format::ContainerFormat;
pub use mmap_decode::{read_file_bytes, FileBytes};

use crate::core::grid::PixelGrid;
use crate::error::DecodeError;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where image bytes come from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A file on disk
    Path(PathBuf),
    /// Bytes already in memory, optionally with the name they came under
    Buffer { data: Vec<u8>, name: Option<String> },
}

impl ImageSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn buffer(data: Vec<u8>, name: Option<String>) -> Self {
        Self::Buffer { data, name }
    }

    /// File extension declared by the source, lowercased.
    ///
    /// A leading dot (as in `.hidden`) does not start an extension.
    pub fn extension(&self) -> Option<String> {
        let name = match self {
            Self::Path(path) => path.file_name()?.to_str()?,
            Self::Buffer { name, .. } => {
                let name = name.as_deref()?;
                Path::new(name).file_name()?.to_str()?
            }
        };

        let dot = name.rfind('.')?;
        if dot == 0 || dot + 1 == name.len() {
            return None;
        }
        Some(name[dot + 1..].to_lowercase())
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Buffer { name: Some(name), .. } => write!(f, "{}", name),
            Self::Buffer { data, name: None } => write!(f, "<buffer: {} bytes>", data.len()),
        }
    }
}

/// Explicit dispatch settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Log advisory notices such as a skipped extension check
    pub verbose: bool,
}

impl DispatchConfig {
    pub fn verbose(verbose: bool) -> Self {
        Self { verbose }
    }
}

/// Non-fatal observation made while dispatching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchNotice {
    /// No extension was available; only the sniffed type was used
    ExtensionUnchecked,
}

/// A successfully decoded image
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub format: ContainerFormat,
    pub grid: PixelGrid,
    pub notice: Option<DispatchNotice>,
}

/// Pick the container for `bytes`, cross-checking the declared extension.
pub fn detect(
    bytes: &[u8],
    extension: Option<&str>,
) -> Result<(ContainerFormat, Option<DispatchNotice>), DecodeError> {
    let sniffed = ContainerFormat::sniff(bytes).ok_or_else(|| DecodeError::Unsupported {
        detail: match extension {
            Some(ext) => format!(
                "content not recognized as PNG, JPEG or WebP (extension .{})",
                ext
            ),
            None => "content not recognized as PNG, JPEG or WebP".to_string(),
        },
    })?;

    match extension {
        Some(ext) if ContainerFormat::from_extension(ext) == Some(sniffed) => Ok((sniffed, None)),
        Some(ext) => Err(DecodeError::FormatMismatch {
            extension: ext.to_string(),
            detected: sniffed,
        }),
        None => Ok((sniffed, Some(DispatchNotice::ExtensionUnchecked))),
    }
}

/// Detect and decode `bytes`.
pub fn dispatch(
    bytes: &[u8],
    extension: Option<&str>,
    config: &DispatchConfig,
) -> Result<DecodedImage, DecodeError> {
    let (format, notice) = detect(bytes, extension)?;

    if notice.is_some() && config.verbose {
        warn!(mime = format.mime(), "No file extension found, using sniffed content type");
    }

    let grid = FastDecoder::decode(bytes, format)?;
    debug!(
        %format,
        width = grid.width(),
        height = grid.height(),
        "decoded image"
    );

    Ok(DecodedImage {
        format,
        grid,
        notice,
    })
}

/// Read a source's bytes and decode them.
pub fn load(source: &ImageSource, config: &DispatchConfig) -> Result<DecodedImage, DecodeError> {
    let extension = source.extension();

    match source {
        ImageSource::Path(path) => {
            let bytes = read_file_bytes(path)?;
            dispatch(&bytes, extension.as_deref(), config)
        }
        ImageSource::Buffer { data, .. } => dispatch(data, extension.as_deref(), config),
    }
}
